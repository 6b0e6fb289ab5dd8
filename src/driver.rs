//! Frame driver
//!
//! Owns the simulation, a render sink and a score store, and exposes the two
//! things a host loop needs: `step` once per display frame, and `handle` for
//! input. The host stops scheduling frames once `step` returns false and
//! resumes when `handle` reports a restart.

use crate::highscores::ScoreStore;
use crate::renderer::{RenderSink, Snapshot};
use crate::sim::{GameEvent, InputEvent, SimConfig, SimulationState, handle_input, tick};

/// Simulation + render + persistence for one session
pub struct FrameDriver<S: RenderSink, P: ScoreStore> {
    state: SimulationState,
    sink: S,
    scores: P,
    games_played: u32,
}

impl<S: RenderSink, P: ScoreStore> FrameDriver<S, P> {
    /// Start a session; the persisted high score is read once here
    pub fn new(config: SimConfig, seed: u64, sink: S, scores: P) -> Self {
        let state = SimulationState::new(config, seed, scores.get());
        log::info!(
            "Session started (seed {}, high score {})",
            seed,
            state.high_score
        );
        Self {
            state,
            sink,
            scores,
            games_played: 0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn scores(&self) -> &P {
        &self.scores
    }

    /// Finished runs so far
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Simulate one frame and draw it. Returns whether another frame should
    /// be scheduled.
    pub fn step(&mut self) -> bool {
        let events = tick(&mut self.state, &mut self.scores);
        self.observe(&events);
        self.render();
        !self.state.is_game_over()
    }

    /// Draw the current state without simulating
    pub fn render(&mut self) {
        let snapshot = Snapshot::from_state(&self.state);
        self.sink.render(&snapshot);
    }

    /// Feed one input event. Returns true if it restarted the game, in which
    /// case the host must resume its frame loop.
    pub fn handle(&mut self, input: InputEvent) -> bool {
        let events = handle_input(&mut self.state, input);
        self.observe(&events);
        events
            .iter()
            .any(|e| matches!(e, GameEvent::Restarted { .. }))
    }

    fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::GameOver { .. } => self.games_played += 1,
                GameEvent::PowerUpSpawned(kind) => {
                    log::debug!("Frame {}: {} falling", self.state.frame, kind.label())
                }
                _ => log::trace!("Frame {}: {:?}", self.state.frame, event),
            }
        }
    }
}

/// Demo controller: steers the paddle under the ball
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    last: Option<InputEvent>,
}

impl Autopilot {
    /// Dead zone around the paddle center, in playfield units
    const SLACK: f32 = 6.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Next input to send, if the paddle's intent should change
    pub fn decide(&mut self, state: &SimulationState) -> Option<InputEvent> {
        if state.is_game_over() {
            self.last = None;
            return Some(InputEvent::Restart);
        }

        let center = state.paddle.pos.x + state.paddle_width() / 2.0;
        let offset = state.ball.pos.x - center;
        let wanted = if offset > Self::SLACK {
            InputEvent::RightDown
        } else if offset < -Self::SLACK {
            InputEvent::LeftDown
        } else {
            InputEvent::RightUp
        };

        if self.last == Some(wanted) {
            None
        } else {
            self.last = Some(wanted);
            Some(wanted)
        }
    }
}
