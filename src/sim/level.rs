//! Level generation and ball serve
//!
//! A level is a full brick grid with per-brick random toughness. The grid is
//! rebuilt from scratch on game start, on every level-up and on restart.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;
use rand::Rng;

use super::state::{BrickGrid, BrickLayout, Color, SimulationState};
use crate::consts::BRICK_MAX_TOUGHNESS;

/// Brick colors indexed by starting toughness - 1
pub const BRICK_PALETTE: [Color; BRICK_MAX_TOUGHNESS as usize] = [
    Color::rgb(0xff, 0x00, 0x00),
    Color::rgb(0xff, 0x77, 0x00),
    Color::rgb(0xff, 0xff, 0x00),
];

/// Build a fresh grid with uniform-random toughness in 1..=3
pub fn generate<R: Rng>(layout: BrickLayout, rng: &mut R) -> BrickGrid {
    let grid = BrickGrid::from_toughness(layout, &BRICK_PALETTE, |_, _| {
        rng.random_range(1..=BRICK_MAX_TOUGHNESS)
    });
    log::debug!(
        "Generated {}x{} brick grid ({} hits total)",
        layout.columns,
        layout.rows,
        grid.iter().map(|b| u32::from(b.status)).sum::<u32>()
    );
    grid
}

/// Serve velocity for a launch angle in [pi/4, 3pi/4) and a horizontal sign
pub fn serve_velocity(angle: f32, speed: f32, leftward: bool) -> Vec2 {
    let sign = if leftward { -1.0 } else { 1.0 };
    Vec2::new(angle.sin() * speed * sign, -angle.cos() * speed)
}

/// Put the ball back in the middle of the playfield with a random heading
pub fn reset_ball(state: &mut SimulationState) {
    state.ball.pos = Vec2::new(state.config.width / 2.0, state.config.height / 2.0);

    let angle = state.rng.random::<f32>() * FRAC_PI_2 + FRAC_PI_4;
    let leftward = !state.rng.random_bool(0.5);
    let speed = state.ball.current_speed(&state.upgrades);
    state.ball.vel = serve_velocity(angle, speed, leftward);
}
