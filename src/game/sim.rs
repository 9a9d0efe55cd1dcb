use anyhow::Result;
use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

use super::config::SimConfig;
use super::direction::Direction;
use super::state::{Cell, CollisionCause, Snake};

/// What a single tick did, for the caller to react to (metrics, sound,
/// screen transitions). The simulation state itself is read through the
/// accessors on [`GridSim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// False when the tick was a no-op (simulation not running).
    pub moved: bool,
    /// The head landed on food this tick.
    pub ate_food: bool,
    /// The run ended this tick, and why.
    pub collision: Option<CollisionCause>,
    /// Score at the moment of death, captured before the board reset.
    pub final_score: Option<u32>,
    /// The body covered the whole board this tick.
    pub finished: bool,
}

/// Discrete-time snake simulation on a bounded grid.
///
/// The sim owns the body, heading, food and scores exclusively; callers
/// drive it with [`GridSim::step`] at a fixed cadence and
/// [`GridSim::set_heading`] on directional input, and poll state through
/// the read accessors. It never reads a clock, so tick pacing belongs
/// entirely to the caller.
pub struct GridSim {
    config: SimConfig,
    rng: ThreadRng,
    snake: Snake,
    food: Cell,
    score: u32,
    high_score: u32,
    running: bool,
    finished: bool,
    grow_pending: bool,
    turn_taken: bool,
}

impl GridSim {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let snake = Self::starting_snake(&config);
        let mut sim = Self {
            rng: rand::thread_rng(),
            snake,
            food: Cell::new(0, 0),
            score: 0,
            high_score: 0,
            running: true,
            finished: false,
            grow_pending: false,
            turn_taken: false,
            config,
        };
        sim.food = sim.place_food();
        Ok(sim)
    }

    /// Rebuilds the starting board. The high score survives; everything
    /// else goes back to its initial value.
    pub fn reset(&mut self) {
        self.snake = Self::starting_snake(&self.config);
        self.food = self.place_food();
        self.score = 0;
        self.running = true;
        self.finished = false;
        self.grow_pending = false;
        self.turn_taken = false;
    }

    fn starting_snake(config: &SimConfig) -> Snake {
        let head = Cell::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        Snake::new(head, Direction::Right, config.initial_snake_length)
    }

    /// Requests a change of heading, applied from the next step on.
    ///
    /// Reversing straight into the neck is ignored. With
    /// [`Features::latched_turns`](super::Features) enabled, only the
    /// first accepted turn per tick sticks; the latch re-arms when the
    /// next step runs. A directional input also resumes the simulation
    /// after a game over. Once the board has been cleared, input is
    /// ignored for good.
    pub fn set_heading(&mut self, dir: Direction) {
        if self.finished {
            return;
        }
        if !self.running {
            debug!("resuming after game over");
            self.running = true;
        }
        let current = self.snake.heading();
        if dir == current {
            return;
        }
        if dir.is_opposite(current) {
            debug!("ignoring reversal into the neck");
            return;
        }
        if self.config.features.latched_turns && self.turn_taken {
            debug!("turn already taken this tick, dropping {dir:?}");
            return;
        }
        self.snake.set_heading(dir);
        self.turn_taken = true;
    }

    /// Advances the simulation by one tick.
    ///
    /// The head moves one cell along the heading and any growth owed
    /// from the previous tick is applied before anything is checked, so
    /// the collision and occupancy sets always describe the real
    /// post-move body. The full-board check runs before food handling:
    /// on a filled board there is no cell left to place food on.
    pub fn step(&mut self) -> StepResult {
        if !self.running {
            return StepResult::default();
        }

        let new_head = self.snake.advance(self.grow_pending);
        self.grow_pending = false;

        if self.config.features.win_on_fill && self.snake.len() == self.config.total_cells() {
            self.finish();
            return StepResult {
                moved: true,
                finished: true,
                ..StepResult::default()
            };
        }

        let mut ate_food = false;
        if new_head == self.food {
            self.grow_pending = true;
            if self.config.features.scoring {
                self.score += 1;
            }
            self.food = self.place_food();
            ate_food = true;
        }

        if let Some(cause) = self.collision(new_head) {
            let final_score = self.score;
            info!("game over ({cause:?}) with score {final_score}");
            self.high_score = self.high_score.max(final_score);
            self.reset();
            self.running = false;
            return StepResult {
                moved: true,
                collision: Some(cause),
                final_score: Some(final_score),
                ..StepResult::default()
            };
        }

        self.turn_taken = false;
        StepResult {
            moved: true,
            ate_food,
            ..StepResult::default()
        }
    }

    fn collision(&self, head: Cell) -> Option<CollisionCause> {
        if !self.in_bounds(head) {
            return Some(CollisionCause::Wall);
        }
        if self.snake.bites(head) {
            return Some(CollisionCause::Tail);
        }
        None
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.config.grid_width as i32
            && cell.y < self.config.grid_height as i32
    }

    fn finish(&mut self) {
        info!("board filled with score {}", self.score);
        self.high_score = self.high_score.max(self.score);
        self.running = false;
        self.finished = true;
    }

    /// Draws uniform random cells until one falls outside the body.
    /// Only callable while at least one cell is free; the full-board
    /// check in [`GridSim::step`] keeps it that way.
    fn place_food(&mut self) -> Cell {
        debug_assert!(
            self.snake.len() < self.config.total_cells(),
            "no free cell left for food"
        );
        loop {
            let cell = Cell::new(
                self.rng.gen_range(0..self.config.grid_width as i32),
                self.rng.gen_range(0..self.config.grid_height as i32),
            );
            if !self.snake.contains(cell) {
                return cell;
            }
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// High-water mark over all runs since construction.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn finished(&self) -> bool {
        self.finished
    }
}
