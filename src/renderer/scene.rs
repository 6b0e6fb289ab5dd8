//! Scene building: snapshot -> ordered draw commands
//!
//! Back-ends (canvas, text) replay the command list; all layout decisions
//! live here so every back-end draws the same thing.

use serde::Serialize;

use super::Snapshot;
use crate::consts::POWER_UP_SIZE;
use crate::sim::Color;

/// Colors for game elements
pub mod colors {
    use crate::sim::Color;

    pub const BACKGROUND: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const PADDLE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BALL: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BRICK_LABEL: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const OVERLAY: Color = Color::rgba(0x00, 0x00, 0x00, 0.7);
    pub const TEXT: Color = Color::rgb(0xff, 0xff, 0xff);
}

pub const FONT_FAMILY: &str = "Courier New";

/// Horizontal anchoring of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single drawing primitive in playfield coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        /// Character used by text back-ends
        glyph: char,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Stats shown outside the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub level: u32,
    pub lives: u32,
    pub score: u64,
}

/// Everything to draw for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
    pub hud: Hud,
}

/// Lay out one frame. Pure: equal snapshots give equal scenes.
pub fn build_scene(snapshot: &Snapshot<'_>) -> Scene {
    let mut commands = vec![DrawCommand::Clear {
        color: colors::BACKGROUND,
    }];
    let layout = snapshot.bricks.layout;

    for brick in snapshot.bricks.iter().filter(|b| b.is_alive()) {
        commands.push(DrawCommand::Rect {
            x: brick.pos.x,
            y: brick.pos.y,
            w: layout.width,
            h: layout.height,
            color: brick.color,
            glyph: '=',
        });
        // Remaining toughness
        commands.push(DrawCommand::Text {
            x: brick.pos.x + layout.width / 2.0,
            y: brick.pos.y + layout.height / 2.0 + 4.0,
            text: brick.status.to_string(),
            size: 12.0,
            color: colors::BRICK_LABEL,
            align: TextAlign::Center,
        });
    }

    commands.push(DrawCommand::Rect {
        x: snapshot.paddle.pos.x,
        y: snapshot.paddle.pos.y,
        w: snapshot.paddle_width,
        h: snapshot.paddle.height,
        color: colors::PADDLE,
        glyph: '#',
    });

    commands.push(DrawCommand::Circle {
        x: snapshot.ball.pos.x,
        y: snapshot.ball.pos.y,
        radius: snapshot.ball.radius,
        color: colors::BALL,
    });

    for power_up in snapshot.power_ups {
        commands.push(DrawCommand::Rect {
            x: power_up.pos.x,
            y: power_up.pos.y,
            w: POWER_UP_SIZE,
            h: POWER_UP_SIZE,
            color: power_up.kind.color(),
            glyph: power_up.kind.label().chars().next().unwrap_or('*'),
        });
    }

    if snapshot.game_over {
        push_game_over(&mut commands, snapshot);
    }

    Scene {
        width: snapshot.width,
        height: snapshot.height,
        commands,
        hud: Hud {
            level: snapshot.level,
            lives: snapshot.lives,
            score: snapshot.score,
        },
    }
}

fn push_game_over(commands: &mut Vec<DrawCommand>, snapshot: &Snapshot<'_>) {
    let (cx, cy) = (snapshot.width / 2.0, snapshot.height / 2.0);

    commands.push(DrawCommand::Rect {
        x: 0.0,
        y: 0.0,
        w: snapshot.width,
        h: snapshot.height,
        color: colors::OVERLAY,
        glyph: ' ',
    });

    let lines = [
        ("GAME OVER".to_string(), 36.0, -30.0),
        (format!("Score: {}", snapshot.score), 24.0, 10.0),
        (format!("High Score: {}", snapshot.high_score), 24.0, 40.0),
        ("Press SPACE to restart".to_string(), 24.0, 80.0),
    ];
    for (text, size, dy) in lines {
        commands.push(DrawCommand::Text {
            x: cx,
            y: cy + dy,
            text,
            size,
            color: colors::TEXT,
            align: TextAlign::Center,
        });
    }
}
