//! Power-up drops, falling and pickup effects
//!
//! Power-ups fall straight down at a constant speed. Touching the paddle
//! applies the effect instantly; falling off the bottom discards it. Effects
//! never expire.

use glam::Vec2;
use rand::Rng;

use super::collision::power_up_touches_paddle;
use super::state::{Brick, GameEvent, PowerUp, PowerUpKind, SimulationState};
use crate::consts::*;

/// Roll for a drop from a just-destroyed brick
pub fn roll_drop<R: Rng>(rng: &mut R) -> bool {
    rng.random_bool(POWER_UP_DROP_CHANCE)
}

/// Where a power-up released by `brick` starts: horizontally centered, top edge
pub fn spawn_position(brick: &Brick, brick_width: f32) -> Vec2 {
    Vec2::new(
        brick.pos.x + brick_width / 2.0 - POWER_UP_SIZE / 2.0,
        brick.pos.y,
    )
}

/// Add a power-up of a uniformly random kind at `pos`
pub fn spawn<R: Rng>(power_ups: &mut Vec<PowerUp>, pos: Vec2, rng: &mut R) -> PowerUpKind {
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    power_ups.push(PowerUp {
        kind,
        pos,
        fall_speed: POWER_UP_FALL_SPEED,
    });
    kind
}

/// Move every power-up down one step, then resolve pickups and misses
pub fn advance_all(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let mut power_ups = std::mem::take(&mut state.power_ups);
    let bottom = state.config.height;

    power_ups.retain_mut(|p| {
        p.pos.y += p.fall_speed;

        if power_up_touches_paddle(p.pos, &state.paddle, state.paddle_width()) {
            apply(state, p.kind);
            events.push(GameEvent::PowerUpCollected(p.kind));
            return false;
        }
        p.pos.y <= bottom
    });

    state.power_ups = power_ups;
}

/// Apply a collected power-up. Every pickup is worth a flat bonus on top of
/// its own effect.
pub fn apply(state: &mut SimulationState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::ExtraLife => {
            state.lives += 1;
        }
        PowerUpKind::WiderPaddle => {
            state.upgrades.paddle_width += 1;
            // Growing against the right wall must not push the paddle out
            state.clamp_paddle();
        }
        PowerUpKind::FasterBall => {
            // Both the upgrade counter and the base speed move: the bonus
            // counts twice until the next restart resets the base speed.
            state.upgrades.ball_speed += 1;
            state.ball.speed += 1.0;
        }
        PowerUpKind::MultiBall => {
            // No extra balls are simulated; each phantom ball is paid out
            for _ in 0..MULTI_BALL_PHANTOM_BALLS {
                state.score += MULTI_BALL_POINTS_PER_BALL;
            }
        }
    }
    state.score += PICKUP_POINTS;
    log::info!(
        "Collected {} (lives {}, upgrades {:?})",
        kind.label(),
        state.lives,
        state.upgrades
    );
}
