//! Level and run transitions
//!
//! Playing -> LevelTransition -> Playing when the grid is cleared (same step),
//! Playing -> GameOver when the last life is lost, GameOver -> Playing only
//! through an explicit restart.

use super::level::{self, reset_ball};
use super::state::{Ball, GameEvent, GamePhase, SimulationState};
use crate::consts::{BALL_BASE_SPEED, PADDLE_BASE_WIDTH, STARTING_LIVES};
use crate::highscores::ScoreStore;

/// Advance to the next level: fresh grid, ball re-served from the center
pub fn level_up(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::LevelTransition;
    state.level += 1;
    state.level_complete = true;
    state.bricks = level::generate(state.config.bricks, &mut state.rng);
    reset_ball(state);
    state.phase = GamePhase::Playing;

    log::info!("Level {} (score {})", state.level, state.score);
    events.push(GameEvent::LevelComplete {
        new_level: state.level,
    });
}

/// End the run. A new best score is written through to the store; a failed
/// write only costs persistence, the in-memory high score still updates.
pub fn enter_game_over(
    state: &mut SimulationState,
    scores: &mut dyn ScoreStore,
    events: &mut Vec<GameEvent>,
) {
    state.phase = GamePhase::GameOver;

    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
        scores.set(state.high_score);
    }

    log::info!(
        "Game over at level {} with score {} (best {})",
        state.level,
        state.score,
        state.high_score
    );
    events.push(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
}

/// Start a new run after game over. High score and upgrade counters carry
/// over; everything else returns to its starting value.
pub fn restart(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    state.level = 1;
    state.lives = STARTING_LIVES + state.upgrades.extra_lives;
    state.score = 0;
    state.phase = GamePhase::Playing;
    state.level_complete = false;

    state.paddle.base_width = PADDLE_BASE_WIDTH;
    state.ball = Ball {
        speed: BALL_BASE_SPEED,
        ..Ball::new(&state.config)
    };
    state.power_ups.clear();
    state.bricks = level::generate(state.config.bricks, &mut state.rng);
    reset_ball(state);

    log::info!(
        "Restarted with {} lives, upgrades {:?}",
        state.lives,
        state.upgrades
    );
    events.push(GameEvent::Restarted { lives: state.lives });
}
