use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Feature switches for the optional parts of the ruleset, from bare
/// movement up to scoring and a terminal win state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Features {
    /// Count a point per food eaten. Off pins the score at 0.
    pub scoring: bool,
    /// End the run in a terminal win state when the body covers the
    /// whole board.
    pub win_on_fill: bool,
    /// Accept at most one turn per tick; later same-tick turns are
    /// dropped until the next step re-arms the latch.
    pub latched_turns: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            scoring: true,
            win_on_fill: true,
            latched_turns: true,
        }
    }
}

/// Configuration for the simulation, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Width of the board in cells
    pub grid_width: usize,
    /// Height of the board in cells
    pub grid_height: usize,
    /// Starting length of the snake
    pub initial_snake_length: usize,
    /// Optional ruleset parts
    pub features: Features,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: 25,
            grid_height: 25,
            initial_snake_length: 3,
            features: Features::default(),
        }
    }
}

impl SimConfig {
    /// Create a configuration with a custom board size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Small board for tests
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn total_cells(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Checks that the starting snake fits on the board and leaves at
    /// least one free cell for food.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "board dimensions must be positive"
        );
        ensure!(
            self.initial_snake_length > 0,
            "snake needs at least one segment"
        );
        ensure!(
            self.initial_snake_length <= self.grid_width / 2 + 1,
            "a {}-cell snake does not fit on a {}x{} board",
            self.initial_snake_length,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.total_cells() > self.initial_snake_length,
            "board leaves no free cell for food"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.grid_width, 25);
        assert_eq!(config.grid_height, 25);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.features.scoring);
        assert!(config.features.win_on_fill);
        assert!(config.features.latched_turns);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = SimConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.total_cells(), 180);
    }

    #[test]
    fn test_rejects_snake_longer_than_half_board() {
        let config = SimConfig {
            initial_snake_length: 4,
            ..SimConfig::new(4, 4)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_board_without_food_room() {
        let config = SimConfig {
            initial_snake_length: 1,
            ..SimConfig::new(1, 1)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        let config = SimConfig::new(0, 10);
        assert!(config.validate().is_err());
        let config = SimConfig {
            initial_snake_length: 0,
            ..SimConfig::small()
        };
        assert!(config.validate().is_err());
    }
}
