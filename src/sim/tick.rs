//! Fixed-step simulation tick
//!
//! One call advances the game by exactly one frame. Simulation speed is tied
//! to how often the host calls [`tick`]; there is no wall-clock delta.

use glam::Vec2;

use super::collision::{
    crosses_bottom, crosses_side_wall, crosses_top_wall, hit_position, hits_paddle,
    paddle_bounce_velocity, point_in_rect,
};
use super::level::reset_ball;
use super::lifecycle;
use super::powerup;
use super::state::{GameEvent, SimulationState};
use crate::consts::BRICK_HIT_POINTS;
use crate::highscores::ScoreStore;

/// Advance the game state by one frame and report what happened.
///
/// Losing the last life ends the frame right there: bricks and falling
/// power-ups are not resolved, so the score recorded at game over is final.
pub fn tick(state: &mut SimulationState, scores: &mut dyn ScoreStore) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.is_game_over() {
        return events;
    }

    state.level_complete = false;
    state.frame += 1;

    move_paddle(state);
    move_ball(state, scores, &mut events);

    // The run ended this frame; nothing else may touch the score
    if state.is_game_over() {
        return events;
    }

    collide_bricks(state, &mut events);
    powerup::advance_all(state, &mut events);

    if state.bricks.is_cleared() {
        lifecycle::level_up(state, &mut events);
    }

    events
}

/// Apply the paddle's input velocity and keep it inside the playfield
pub fn move_paddle(state: &mut SimulationState) {
    state.paddle.pos.x += state.paddle.dx;
    state.clamp_paddle();
}

/// Integrate the ball and resolve walls, paddle and the bottom edge
pub fn move_ball(
    state: &mut SimulationState,
    scores: &mut dyn ScoreStore,
    events: &mut Vec<GameEvent>,
) {
    let (width, height) = (state.config.width, state.config.height);
    let ball = &mut state.ball;

    ball.pos += ball.vel;

    if crosses_side_wall(ball.pos.x, ball.vel.x, ball.radius, width) {
        ball.vel.x = -ball.vel.x;
    }
    if crosses_top_wall(ball.pos.y, ball.vel.y, ball.radius) {
        ball.vel.y = -ball.vel.y;
    }

    let paddle_width = state.paddle.effective_width(&state.upgrades);
    if hits_paddle(
        ball.pos,
        ball.vel,
        ball.radius,
        &state.paddle,
        paddle_width,
        height,
    ) {
        let hit = hit_position(ball.pos.x, state.paddle.pos.x, paddle_width);
        ball.vel = paddle_bounce_velocity(hit, ball.current_speed(&state.upgrades));
    }

    if crosses_bottom(ball.pos.y, ball.vel.y, ball.radius, height) {
        if state.lives > 1 {
            state.lives -= 1;
            log::info!("Ball lost, {} lives left", state.lives);
            events.push(GameEvent::LifeLost {
                lives_left: state.lives,
            });
            reset_ball(state);
        } else {
            lifecycle::enter_game_over(state, scores, events);
        }
    }
}

/// Resolve at most one brick hit per frame, scanning column-major.
///
/// The ball only ever bounces vertically off a brick, whichever side it
/// entered from.
pub fn collide_bricks(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let layout = state.config.bricks;
    let size = Vec2::new(layout.width, layout.height);
    let center = state.ball.pos;

    let Some(brick) = state
        .bricks
        .iter_mut()
        .find(|b| b.is_alive() && point_in_rect(center, b.pos, size))
    else {
        return;
    };

    state.ball.vel.y = -state.ball.vel.y;
    let destroyed = brick.hit();
    state.score += BRICK_HIT_POINTS;

    let (column, row) = (brick.column, brick.row);
    let drop_pos = powerup::spawn_position(brick, layout.width);
    log::debug!("Brick ({column}, {row}) hit, {} left", brick.status);
    events.push(GameEvent::BrickHit {
        column,
        row,
        destroyed,
    });

    if destroyed && powerup::roll_drop(&mut state.rng) {
        let kind = powerup::spawn(&mut state.power_ups, drop_pos, &mut state.rng);
        log::debug!("{} dropped at {drop_pos}", kind.label());
        events.push(GameEvent::PowerUpSpawned(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::MemoryScoreStore;
    use crate::sim::level::BRICK_PALETTE;
    use crate::sim::state::{BrickGrid, GamePhase, PowerUp, PowerUpKind, SimConfig};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// A state with every brick at toughness 1 and the ball parked where it
    /// touches nothing
    fn quiet_state() -> SimulationState {
        let config = SimConfig::default();
        let mut state = SimulationState::new(config, 12345, 0);
        state.bricks = BrickGrid::from_toughness(config.bricks, &BRICK_PALETTE, |_, _| 1);
        state.ball.pos = Vec2::new(430.0, 300.0);
        state.ball.vel = Vec2::new(0.0, 0.0);
        state
    }

    #[test]
    fn test_ball_integrates_velocity() {
        let mut state = quiet_state();
        state.ball.vel = Vec2::new(2.0, -1.0);
        let mut store = MemoryScoreStore::default();

        tick(&mut state, &mut store);

        assert_eq!(state.ball.pos, Vec2::new(432.0, 299.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_side_wall_reflects_before_crossing() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(845.0, 300.0);
        state.ball.vel = Vec2::new(4.0, 0.0);
        let mut store = MemoryScoreStore::default();

        tick(&mut state, &mut store);

        // Moved to 849; 849 + 4 > 852, so dx flips but position is not corrected
        assert_eq!(state.ball.pos.x, 849.0);
        assert_eq!(state.ball.vel.x, -4.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(405.0, 13.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        let mut store = MemoryScoreStore::default();

        tick(&mut state, &mut store);

        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn test_brick_hit_straight_down() {
        let mut state = quiet_state();
        // Brick (0, 0) spans x 35..105, y 50..70
        state.ball.pos = Vec2::new(70.0, 50.0);
        state.ball.vel = Vec2::new(0.0, 3.0);
        let mut store = MemoryScoreStore::default();

        let events = tick(&mut state, &mut store);

        assert_eq!(state.bricks.get(0, 0).unwrap().status, 0);
        assert_eq!(state.score, BRICK_HIT_POINTS);
        assert_eq!(state.ball.vel.y, -3.0);
        assert_eq!(
            events[0],
            GameEvent::BrickHit {
                column: 0,
                row: 0,
                destroyed: true
            }
        );
        assert_eq!(state.bricks.remaining(), state.bricks.len() - 1);
    }

    #[test]
    fn test_tough_brick_survives_hit() {
        let mut state = quiet_state();
        state.bricks.get_mut(2, 1).unwrap().status = 3;
        let origin = state.bricks.get(2, 1).unwrap().pos;
        state.ball.pos = origin + Vec2::new(30.0, 5.0);
        state.ball.vel = Vec2::new(0.0, -2.0);
        let mut store = MemoryScoreStore::default();

        let events = tick(&mut state, &mut store);

        assert_eq!(state.bricks.get(2, 1).unwrap().status, 2);
        assert_eq!(state.ball.vel.y, 2.0);
        assert!(state.power_ups.is_empty());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_one_brick_per_frame() {
        let mut state = quiet_state();
        state.bricks.get_mut(0, 0).unwrap().status = 3;
        state.ball.pos = Vec2::new(70.0, 60.0);
        let mut store = MemoryScoreStore::default();

        let events = tick(&mut state, &mut store);
        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickHit { .. }))
            .count();
        assert_eq!(hits, 1);
        assert_eq!(state.bricks.get(0, 0).unwrap().status, 2);
    }

    #[test]
    fn test_paddle_center_hit_sends_ball_up() {
        let mut state = quiet_state();
        state.paddle.pos.x = 380.0;
        state.ball.pos = Vec2::new(430.0, 575.0);
        state.ball.vel = Vec2::new(0.0, 4.0);
        let mut store = MemoryScoreStore::default();

        tick(&mut state, &mut store);

        let speed = state.ball.current_speed(&state.upgrades);
        assert!(state.ball.vel.x.abs() < 1e-4);
        assert!((state.ball.vel.y + speed).abs() < 1e-4);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_paddle_hit_uses_upgraded_speed() {
        let mut state = quiet_state();
        state.upgrades.ball_speed = 2;
        state.paddle.pos.x = 380.0;
        state.ball.pos = Vec2::new(400.0, 575.0);
        state.ball.vel = Vec2::new(1.0, 4.0);
        let mut store = MemoryScoreStore::default();

        tick(&mut state, &mut store);

        assert!((state.ball.vel.length() - (BALL_BASE_SPEED + 2.0)).abs() < 1e-4);
        // Left of center: heads left
        assert!(state.ball.vel.x < 0.0);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_life_lost_resets_ball() {
        let mut state = quiet_state();
        state.paddle.pos.x = 0.0;
        state.ball.pos = Vec2::new(430.0, 585.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        let mut store = MemoryScoreStore::default();

        let events = tick(&mut state, &mut store);

        assert_eq!(state.lives, 2);
        assert!(!state.is_game_over());
        assert_eq!(state.ball.pos, Vec2::new(430.0, 300.0));
        assert_eq!(events, vec![GameEvent::LifeLost { lives_left: 2 }]);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = quiet_state();
        state.lives = 1;
        state.score = 120;
        state.high_score = 100;
        state.paddle.pos.x = 0.0;
        state.ball.pos = Vec2::new(430.0, 590.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        let mut store = MemoryScoreStore::new(100);

        let events = tick(&mut state, &mut store);

        assert!(state.is_game_over());
        assert_eq!(state.lives, 1);
        assert_eq!(state.high_score, 120);
        assert_eq!(store.get(), 120);
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                score: 120,
                new_high_score: true
            }]
        );
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = quiet_state();
        state.phase = GamePhase::GameOver;
        state.ball.vel = Vec2::new(3.0, 3.0);
        let before = state.ball.pos;
        let mut store = MemoryScoreStore::default();

        let events = tick(&mut state, &mut store);

        assert!(events.is_empty());
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_clearing_last_brick_levels_up() {
        let mut state = quiet_state();
        for brick in state.bricks.iter_mut() {
            brick.status = 0;
        }
        state.bricks.get_mut(0, 0).unwrap().status = 1;
        state.ball.pos = Vec2::new(70.0, 50.0);
        state.ball.vel = Vec2::new(0.0, 3.0);
        let mut store = MemoryScoreStore::default();

        let events = tick(&mut state, &mut store);

        assert_eq!(state.level, 2);
        assert!(state.level_complete);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bricks.remaining(), state.bricks.len());
        assert_eq!(state.ball.pos, Vec2::new(430.0, 300.0));
        let speed = state.ball.current_speed(&state.upgrades);
        assert!((state.ball.vel.length() - speed).abs() < 1e-4);
        assert!(events.contains(&GameEvent::LevelComplete { new_level: 2 }));

        // The flag only lives for the step that set it
        tick(&mut state, &mut store);
        assert!(!state.level_complete);
    }

    #[test]
    fn test_paddle_clamped_at_edges() {
        let mut state = quiet_state();
        state.paddle.pos.x = 3.0;
        state.paddle.dx = -PADDLE_SPEED;
        move_paddle(&mut state);
        assert_eq!(state.paddle.pos.x, 0.0);

        state.upgrades.paddle_width = 2;
        state.paddle.pos.x = 735.0;
        state.paddle.dx = PADDLE_SPEED;
        move_paddle(&mut state);
        assert_eq!(state.paddle.pos.x, CANVAS_WIDTH - 140.0);
    }

    #[test]
    fn test_score_never_decreases_over_a_long_run() {
        let mut state = SimulationState::new(SimConfig::default(), 777, 0);
        let mut store = MemoryScoreStore::default();
        let mut last_score = 0;
        let mut statuses: Vec<u8> = state.bricks.iter().map(|b| b.status).collect();
        let mut level = state.level;

        for frame in 0..5_000 {
            // Keep the paddle under the ball
            let target = state.ball.pos.x - state.paddle_width() / 2.0;
            state.paddle.dx = (target - state.paddle.pos.x).clamp(-PADDLE_SPEED, PADDLE_SPEED);

            tick(&mut state, &mut store);
            if state.is_game_over() {
                break;
            }
            assert!(state.score >= last_score, "score dropped at frame {frame}");
            last_score = state.score;

            if state.level == level {
                for (before, brick) in statuses.iter().zip(state.bricks.iter()) {
                    assert!(brick.status <= *before);
                }
            }
            statuses = state.bricks.iter().map(|b| b.status).collect();
            level = state.level;
        }
    }

    #[test]
    fn test_wider_paddle_at_right_wall_stays_in_bounds() {
        let mut state = quiet_state();
        state.paddle.pos.x = CANVAS_WIDTH - PADDLE_BASE_WIDTH;
        state.power_ups.push(PowerUp {
            kind: PowerUpKind::WiderPaddle,
            pos: Vec2::new(800.0, 568.0),
            fall_speed: POWER_UP_FALL_SPEED,
        });
        let mut store = MemoryScoreStore::default();

        let events = tick(&mut state, &mut store);

        assert_eq!(
            events,
            vec![GameEvent::PowerUpCollected(PowerUpKind::WiderPaddle)]
        );
        assert_eq!(state.paddle_width(), 120.0);
        assert_eq!(state.paddle.pos.x, CANVAS_WIDTH - 120.0);
    }

    #[test]
    fn test_destroying_hit_drops_power_up_in_tick() {
        let found = (0..64u64).find_map(|seed| {
            let mut state = quiet_state();
            state.rng = Pcg32::seed_from_u64(seed);
            state.ball.pos = Vec2::new(70.0, 50.0);
            state.ball.vel = Vec2::new(0.0, 3.0);
            let mut store = MemoryScoreStore::default();

            let events = tick(&mut state, &mut store);
            events
                .iter()
                .find_map(|e| match e {
                    GameEvent::PowerUpSpawned(kind) => Some(*kind),
                    _ => None,
                })
                .map(|kind| (kind, state))
        });
        let (kind, state) = found.expect("no drop in 64 seeded runs");

        assert_eq!(state.power_ups.len(), 1);
        let power_up = &state.power_ups[0];
        assert_eq!(power_up.kind, kind);
        // Released at (62.5, 50), then falls once in the same step
        assert_eq!(
            power_up.pos,
            Vec2::new(62.5, 50.0 + POWER_UP_FALL_SPEED)
        );
        assert_eq!(state.score, BRICK_HIT_POINTS);
    }

    #[test]
    fn test_game_over_frame_skips_pickups() {
        let mut state = quiet_state();
        state.lives = 1;
        state.paddle.pos.x = 0.0;
        state.ball.pos = Vec2::new(600.0, 590.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        state.power_ups.push(PowerUp {
            kind: PowerUpKind::MultiBall,
            pos: Vec2::new(50.0, 568.0),
            fall_speed: POWER_UP_FALL_SPEED,
        });
        let mut store = MemoryScoreStore::default();

        tick(&mut state, &mut store);

        assert!(state.is_game_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(store.writes(), 0);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_bounds(
            start in 0.0f32..=860.0,
            dir in -1i32..=1,
            width_level in 0u32..10,
            steps in 1usize..200,
        ) {
            let mut state = quiet_state();
            state.upgrades.paddle_width = width_level;
            state.paddle.pos.x = start;
            state.paddle.dx = dir as f32 * PADDLE_SPEED;
            for _ in 0..steps {
                move_paddle(&mut state);
                let max_x = CANVAS_WIDTH - state.paddle_width();
                prop_assert!(state.paddle.pos.x >= 0.0);
                prop_assert!(state.paddle.pos.x <= max_x);
            }
        }
    }
}
