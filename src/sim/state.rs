//! Game state and core simulation types
//!
//! The session owns every piece of mutable game state; nothing lives in globals.

use glam::Vec2;

use super::spawner::Spawner;
use crate::input::{InputState, TickInput};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player alive, ticks keep coming
    Running,
    /// Player hit a block; waits for a restart
    GameOver,
}

/// The player's square
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per second, applied per axis
    pub speed: f32,
    pub score: u32,
    pub alive: bool,
    start: Vec2,
}

impl Player {
    /// Player at bottom-centre of the field
    pub fn new(settings: &Settings) -> Self {
        let start = Vec2::new(
            settings.field_width / 2.0 - settings.player_width / 2.0,
            settings.field_height - settings.player_height,
        );
        Self {
            pos: start,
            size: Vec2::new(settings.player_width, settings.player_height),
            speed: settings.player_speed,
            score: 0,
            alive: true,
            start,
        }
    }

    pub fn start_position(&self) -> Vec2 {
        self.start
    }

    /// Move by `speed * dt` along every held direction, then clamp into the field.
    ///
    /// Diagonals are not normalized: two held axes each get the full distance.
    pub fn move_by(&mut self, dt_ms: f64, input: &TickInput, field: Vec2) {
        let distance = (self.speed as f64 * dt_ms / 1000.0) as f32;

        if input.left {
            self.pos.x -= distance;
        }
        if input.right {
            self.pos.x += distance;
        }
        if input.up {
            self.pos.y -= distance;
        }
        if input.down {
            self.pos.y += distance;
        }

        // max/min rather than clamp: a NaN distance collapses to the lower bound
        self.pos.x = self.pos.x.max(0.0).min(field.x - self.size.x);
        self.pos.y = self.pos.y.max(0.0).min(field.y - self.size.y);
    }

    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    /// Back to the start position with a fresh score
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.score = 0;
        self.alive = true;
    }
}

/// A falling block
#[derive(Debug, Clone, PartialEq)]
pub struct FallingBlock {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per second
    pub speed: f32,
}

impl FallingBlock {
    /// New block at the top edge with random column and speed
    pub fn spawn(spawner: &mut Spawner) -> Self {
        let x = spawner.random_x();
        let speed = spawner.random_speed();
        Self {
            pos: Vec2::new(x, 0.0),
            speed,
        }
    }

    /// Fall for `dt_ms`. Returns true when the block left the field and was
    /// recycled back to the top.
    pub fn advance(&mut self, dt_ms: f64, field_height: f32, spawner: &mut Spawner) -> bool {
        self.pos.y += (self.speed as f64 * dt_ms / 1000.0) as f32;

        if self.pos.y > field_height {
            self.pos.y = 0.0;
            self.pos.x = spawner.random_x();
            self.speed = spawner.random_speed();
            return true;
        }
        false
    }
}

/// Fixed-size set of blocks, recycled in place
#[derive(Debug, Clone)]
pub struct FallingBlocks {
    pub blocks: Vec<FallingBlock>,
    /// Shared by every block
    pub size: Vec2,
    count: usize,
}

impl FallingBlocks {
    pub fn new(count: usize, size: Vec2, spawner: &mut Spawner) -> Self {
        let mut blocks = Self {
            blocks: Vec::with_capacity(count),
            size,
            count,
        };
        blocks.init(spawner);
        blocks
    }

    /// Replace every block with a freshly spawned one
    pub fn init(&mut self, spawner: &mut Spawner) {
        self.blocks.clear();
        for _ in 0..self.count {
            self.blocks.push(FallingBlock::spawn(spawner));
        }
    }

    /// Advance all blocks; returns how many were recycled
    pub fn advance_all(&mut self, dt_ms: f64, field_height: f32, spawner: &mut Spawner) -> u32 {
        let mut recycled = 0;
        for block in &mut self.blocks {
            if block.advance(dt_ms, field_height, spawner) {
                recycled += 1;
            }
        }
        recycled
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    pub player: Player,
    pub blocks: FallingBlocks,
    pub input: InputState,
    pub(crate) spawner: Spawner,
    /// Set once the game over screen has been drawn for the current death
    game_over_rendered: bool,
}

impl GameSession {
    /// Create a session; the seed comes from settings or is drawn at random
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut spawner = Spawner::new(seed, settings.field_width, settings.block_width);
        let blocks = FallingBlocks::new(
            settings.block_count,
            Vec2::new(settings.block_width, settings.block_height),
            &mut spawner,
        );

        log::info!(
            "Session created: field {}x{}, {} blocks, seed {}",
            settings.field_width,
            settings.field_height,
            settings.block_count,
            seed
        );

        Self {
            player: Player::new(&settings),
            blocks,
            input: InputState::new(),
            spawner,
            game_over_rendered: false,
            settings,
        }
    }

    pub fn field(&self) -> Vec2 {
        Vec2::new(self.settings.field_width, self.settings.field_height)
    }

    pub fn phase(&self) -> GamePhase {
        if self.player.alive {
            GamePhase::Running
        } else {
            GamePhase::GameOver
        }
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    pub fn game_over_rendered(&self) -> bool {
        self.game_over_rendered
    }

    /// One-shot guard for the game over screen. True exactly once per death.
    pub fn take_game_over_render(&mut self) -> bool {
        if self.phase() != GamePhase::GameOver || self.game_over_rendered {
            return false;
        }
        self.game_over_rendered = true;
        true
    }

    /// Start over after a game over. Does nothing while running.
    pub fn restart(&mut self) -> bool {
        if self.phase() != GamePhase::GameOver {
            return false;
        }

        let final_score = self.player.score;
        self.input.clear();
        self.player.reset();
        self.blocks.init(&mut self.spawner);
        self.game_over_rendered = false;

        log::info!("Restarted (previous score {})", final_score);
        true
    }
}
