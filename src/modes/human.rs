use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GridSim, SimConfig, StepResult};
use crate::input::{Command, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game session in the terminal.
///
/// Owns the tick schedule: the simulation is stepped at a fixed
/// interval while input handling and rendering run at their own pace.
pub struct HumanMode {
    sim: GridSim,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    bell: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: SimConfig, tick_interval: Duration, bell: bool) -> Result<Self> {
        let sim = GridSim::new(config)?;

        Ok(Self {
            sim,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            bell,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    let result = self.sim.step();
                    self.handle_step_result(result);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.command_for(key) {
                Some(Command::Turn(dir)) => {
                    self.sim.set_heading(dir);
                }
                Some(Command::Restart) => {
                    self.restart();
                }
                Some(Command::Quit) => {
                    self.should_quit = true;
                }
                None => {}
            }
        }
    }

    fn handle_step_result(&mut self, result: StepResult) {
        if result.ate_food {
            self.ring_bell();
        }
        if let Some(final_score) = result.final_score {
            self.metrics.on_game_over(final_score);
            self.ring_bell();
        }
        if result.finished {
            self.metrics.on_game_over(self.sim.score());
            self.ring_bell();
        }
    }

    fn restart(&mut self) {
        // A cleared board is a terminal state; only death allows
        // another round.
        if self.sim.finished() {
            return;
        }
        self.sim.reset();
        self.metrics.on_game_start();
    }

    fn ring_bell(&mut self) {
        if !self.bell {
            return;
        }
        let mut out = stderr();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn mode() -> HumanMode {
        HumanMode::new(SimConfig::small(), Duration::from_millis(200), false).unwrap()
    }

    #[test]
    fn test_session_initialization() {
        let mode = mode();
        assert!(mode.sim.running());
        assert_eq!(mode.sim.score(), 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_restart_rebuilds_board_and_keeps_best() {
        let mut mode = mode();
        // Run into the right wall to end the round.
        for _ in 0..10 {
            let result = mode.sim.step();
            mode.handle_step_result(result);
        }
        assert!(!mode.sim.running());
        assert_eq!(mode.metrics.games_played(), 1);

        mode.restart();
        assert!(mode.sim.running());
        assert_eq!(mode.sim.score(), 0);
        assert_eq!(mode.sim.snake().len(), 3);
    }

    #[test]
    fn test_turn_command_reaches_sim() {
        let mut mode = mode();
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        let event = Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        mode.handle_event(event);
        assert_eq!(mode.sim.snake().heading(), Direction::Down);
    }
}
