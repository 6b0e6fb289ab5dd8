//! Rendering module
//!
//! The simulation hands out an immutable [`Snapshot`] each frame. A
//! [`RenderSink`] turns it into output; sinks never mutate game state, so
//! rendering the same snapshot twice gives the same picture.

pub mod ascii;
pub mod scene;

use serde::Serialize;

use crate::sim::{Ball, BrickGrid, Paddle, PowerUp, SimulationState};

pub use ascii::AsciiSink;
pub use scene::{DrawCommand, Hud, Scene, TextAlign, build_scene};

/// Read-only view of everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub width: f32,
    pub height: f32,
    pub paddle: &'a Paddle,
    /// Paddle width including upgrades
    pub paddle_width: f32,
    pub ball: &'a Ball,
    pub bricks: &'a BrickGrid,
    pub power_ups: &'a [PowerUp],
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
}

impl<'a> Snapshot<'a> {
    pub fn from_state(state: &'a SimulationState) -> Self {
        Self {
            width: state.config.width,
            height: state.config.height,
            paddle: &state.paddle,
            paddle_width: state.paddle_width(),
            ball: &state.ball,
            bricks: &state.bricks,
            power_ups: &state.power_ups,
            level: state.level,
            lives: state.lives,
            score: state.score,
            high_score: state.high_score,
            game_over: state.is_game_over(),
        }
    }
}

/// Consumer of per-frame snapshots
pub trait RenderSink {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}
