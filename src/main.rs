use anyhow::Result;
use clap::Parser;
use grid_snake::game::SimConfig;
use grid_snake::modes::HumanMode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Classic grid snake for the terminal")]
struct Cli {
    /// Board width in cells
    #[arg(long, default_value = "25")]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value = "25")]
    height: usize,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value = "200")]
    tick_ms: u64,

    /// Ring the terminal bell on food, death and win
    #[arg(long)]
    bell: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // The board renders on stderr, so logs keep stdout to themselves.
    env_logger::Builder::from_env(env_logger::Env::default())
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();

    let config = SimConfig::new(cli.width, cli.height);
    let mut mode = HumanMode::new(config, Duration::from_millis(cli.tick_ms), cli.bell)?;
    mode.run().await
}
