use std::time::{Duration, Instant};

/// Session bookkeeping for the HUD. Scores live in the simulation;
/// this only tracks wall time and per-session counters.
pub struct GameMetrics {
    start_time: Instant,
    elapsed_time: Duration,
    games_played: u32,
    last_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            last_score: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.last_score = Some(final_score);
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Final score of the most recent run, if one has ended.
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_run_counters() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.games_played(), 0);
        assert_eq!(metrics.last_score(), None);

        metrics.on_game_over(10);
        assert_eq!(metrics.games_played(), 1);
        assert_eq!(metrics.last_score(), Some(10));

        metrics.on_game_over(4);
        assert_eq!(metrics.games_played(), 2);
        assert_eq!(metrics.last_score(), Some(4));
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
