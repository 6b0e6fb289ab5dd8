//! Simulation state and core data types
//!
//! Everything the frame step reads or writes lives in [`SimulationState`].
//! Systems receive it explicitly; there is no ambient game state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Grid cleared; collapses back to `Playing` within the same step
    LevelTransition,
    /// Run ended, waiting for a restart
    GameOver,
}

/// Something observable that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    BrickHit {
        column: usize,
        row: usize,
        destroyed: bool,
    },
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    LifeLost {
        lives_left: u32,
    },
    LevelComplete {
        new_level: u32,
    },
    GameOver {
        score: u64,
        new_high_score: bool,
    },
    Restarted {
        lives: u32,
    },
}

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string (`#rrggbb`, or `rgba(..)` when translucent)
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Brick grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    pub rows: usize,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_top: BRICK_OFFSET_TOP,
            offset_left: BRICK_OFFSET_LEFT,
        }
    }
}

impl BrickLayout {
    /// Top-left corner of the cell at (column, row)
    pub fn cell_origin(&self, column: usize, row: usize) -> Vec2 {
        Vec2::new(
            column as f32 * (self.width + self.padding) + self.offset_left,
            row as f32 * (self.height + self.padding) + self.offset_top,
        )
    }
}

/// Playfield and grid shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub bricks: BrickLayout,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            bricks: BrickLayout::default(),
        }
    }
}

/// Permanent-within-session progression. Survives restarts, never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub extra_lives: u32,
    pub paddle_width: u32,
    pub ball_speed: u32,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub base_width: f32,
    pub height: f32,
    pub speed: f32,
    /// Horizontal velocity set by input: -speed, 0 or +speed
    pub dx: f32,
}

impl Paddle {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.width / 2.0 - PADDLE_BASE_WIDTH / 2.0,
                config.height - PADDLE_BOTTOM_GAP,
            ),
            base_width: PADDLE_BASE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            dx: 0.0,
        }
    }

    /// Collision/render width including the upgrade bonus
    #[inline]
    pub fn effective_width(&self, upgrades: &Upgrades) -> f32 {
        self.base_width + upgrades.paddle_width as f32 * PADDLE_WIDTH_PER_LEVEL
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Base speed scalar; the FasterBall upgrade is added on top of this
    pub speed: f32,
}

impl Ball {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pos: Vec2::new(config.width / 2.0, config.height / 2.0),
            vel: Vec2::new(3.0, -3.0),
            radius: BALL_RADIUS,
            speed: BALL_BASE_SPEED,
        }
    }

    /// Speed used for launches and paddle bounces
    #[inline]
    pub fn current_speed(&self, upgrades: &Upgrades) -> f32 {
        self.speed + upgrades.ball_speed as f32
    }
}

/// A single brick. `status` is the remaining toughness; 0 means destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    /// Top-left corner
    pub pos: Vec2,
    /// Toughness at level start (1..=3)
    pub toughness: u8,
    pub status: u8,
    pub color: Color,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status > 0
    }

    /// Take one hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        self.status = self.status.saturating_sub(1);
        self.status == 0
    }
}

/// Rectangular brick arrangement addressed by (column, row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    pub layout: BrickLayout,
    /// Column-major storage: `columns[c][r]`
    columns: Vec<Vec<Brick>>,
}

impl BrickGrid {
    /// Build a grid, asking `toughness` for the starting toughness of each
    /// cell in column-major order. Values are clamped into 1..=3.
    pub fn from_toughness(
        layout: BrickLayout,
        palette: &[Color; BRICK_MAX_TOUGHNESS as usize],
        mut toughness: impl FnMut(usize, usize) -> u8,
    ) -> Self {
        let columns = (0..layout.columns)
            .map(|c| {
                (0..layout.rows)
                    .map(|r| {
                        let t = toughness(c, r).clamp(1, BRICK_MAX_TOUGHNESS);
                        Brick {
                            column: c,
                            row: r,
                            pos: layout.cell_origin(c, r),
                            toughness: t,
                            status: t,
                            color: palette[usize::from(t - 1)],
                        }
                    })
                    .collect()
            })
            .collect();
        Self { layout, columns }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        self.columns.get(column).and_then(|col| col.get(row))
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        self.columns.get_mut(column).and_then(|col| col.get_mut(row))
    }

    /// All bricks, column-major
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.columns.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.columns.iter_mut().flatten()
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bricks with status > 0
    pub fn remaining(&self) -> usize {
        self.iter().filter(|b| b.is_alive()).count()
    }

    /// True when every brick is destroyed
    pub fn is_cleared(&self) -> bool {
        self.iter().all(|b| !b.is_alive())
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraLife,
    WiderPaddle,
    FasterBall,
    MultiBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ExtraLife,
        PowerUpKind::WiderPaddle,
        PowerUpKind::FasterBall,
        PowerUpKind::MultiBall,
    ];

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::ExtraLife => Color::rgb(0x00, 0xff, 0x00),
            PowerUpKind::WiderPaddle => Color::rgb(0xff, 0x00, 0xff),
            PowerUpKind::FasterBall => Color::rgb(0xff, 0xff, 0x00),
            PowerUpKind::MultiBall => Color::rgb(0x00, 0xff, 0xff),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::ExtraLife => "Extra Life",
            PowerUpKind::WiderPaddle => "Wider Paddle",
            PowerUpKind::FasterBall => "Faster Ball",
            PowerUpKind::MultiBall => "Multi Ball",
        }
    }
}

/// A falling collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub fall_speed: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub config: SimConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// In-flight power-ups, unordered
    pub power_ups: Vec<PowerUp>,
    pub upgrades: Upgrades,
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    /// Set on level-up, cleared at the start of the next step
    pub level_complete: bool,
    /// Steps simulated since process start
    pub frame: u64,
}

impl SimulationState {
    /// Fresh run: level 1, new grid, ball launched from the center
    pub fn new(config: SimConfig, seed: u64, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = super::level::generate(config.bricks, &mut rng);
        let upgrades = Upgrades::default();
        let mut state = Self {
            config,
            seed,
            rng,
            paddle: Paddle::new(&config),
            ball: Ball::new(&config),
            bricks,
            power_ups: Vec::new(),
            upgrades,
            level: 1,
            lives: STARTING_LIVES + upgrades.extra_lives,
            score: 0,
            high_score,
            phase: GamePhase::Playing,
            level_complete: false,
            frame: 0,
        };
        super::level::reset_ball(&mut state);
        state
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn paddle_width(&self) -> f32 {
        self.paddle.effective_width(&self.upgrades)
    }

    /// Pull the paddle back inside `[0, max(width - effective width, 0)]`
    pub fn clamp_paddle(&mut self) {
        let max_x = (self.config.width - self.paddle_width()).max(0.0);
        self.paddle.pos.x = self.paddle.pos.x.clamp(0.0, max_x);
    }
}
