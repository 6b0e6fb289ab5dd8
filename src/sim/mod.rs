//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One fixed-size step per call, no wall-clock time
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (bricks column-major)
//! - No rendering, storage or platform dependencies beyond the `ScoreStore` trait

pub mod collision;
pub mod input;
pub mod level;
pub mod lifecycle;
pub mod powerup;
pub mod state;
pub mod tick;

pub use input::{InputEvent, handle_input};
pub use level::{BRICK_PALETTE, generate, reset_ball};
pub use state::{
    Ball, Brick, BrickGrid, BrickLayout, Color, GameEvent, GamePhase, Paddle, PowerUp,
    PowerUpKind, SimConfig, SimulationState, Upgrades,
};
pub use tick::tick;
