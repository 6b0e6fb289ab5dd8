//! Input events consumed by the simulation
//!
//! Paddle events overwrite the paddle's velocity (last write wins); they are
//! read at the start of the next step. Restart only works after game over.

use serde::{Deserialize, Serialize};

use super::lifecycle;
use super::state::{GameEvent, SimulationState};

/// Discrete input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    LeftDown,
    RightDown,
    LeftUp,
    RightUp,
    Restart,
}

/// Apply one input event. Returns the events it caused (only a restart
/// produces any).
pub fn handle_input(state: &mut SimulationState, input: InputEvent) -> Vec<GameEvent> {
    let mut events = Vec::new();
    match input {
        InputEvent::LeftDown => state.paddle.dx = -state.paddle.speed,
        InputEvent::RightDown => state.paddle.dx = state.paddle.speed,
        // Releasing either direction stops the paddle
        InputEvent::LeftUp | InputEvent::RightUp => state.paddle.dx = 0.0,
        InputEvent::Restart => {
            if state.is_game_over() {
                lifecycle::restart(state, &mut events);
            } else {
                log::debug!("Restart ignored while playing");
            }
        }
    }
    events
}
