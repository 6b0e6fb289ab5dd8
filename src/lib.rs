//! Brick Rogue - a brick breaker with roguelike upgrades
//!
//! Core modules:
//! - `sim`: Deterministic frame-stepped simulation (physics, power-ups, lifecycle)
//! - `renderer`: Snapshot -> draw commands, plus a text raster sink
//! - `driver`: Frame driver gluing simulation, render sink and score store
//! - `platform`: Host key mapping
//! - `highscores`: Persisted high score store
//! - `settings`: Data-driven configuration

pub mod driver;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{Autopilot, FrameDriver};
pub use highscores::{MemoryScoreStore, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 860.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_BASE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the paddle's top edge to the bottom of the playfield
    pub const PADDLE_BOTTOM_GAP: f32 = 20.0;
    /// Extra paddle width per WiderPaddle upgrade level
    pub const PADDLE_WIDTH_PER_LEVEL: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_BASE_SPEED: f32 = 5.0;

    /// Brick layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const BRICK_MAX_TOUGHNESS: u8 = 3;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 15.0;
    pub const POWER_UP_FALL_SPEED: f32 = 2.0;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.3;

    /// Scoring
    pub const BRICK_HIT_POINTS: u64 = 10;
    pub const PICKUP_POINTS: u64 = 20;
    pub const MULTI_BALL_PHANTOM_BALLS: u64 = 2;
    pub const MULTI_BALL_POINTS_PER_BALL: u64 = 50;

    /// Lives at the start of every run (before extra-life upgrades)
    pub const STARTING_LIVES: u32 = 3;
}
