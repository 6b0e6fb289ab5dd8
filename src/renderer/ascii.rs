//! Text raster back-end
//!
//! Draws a scene onto a fixed character grid. Used by the native demo and by
//! tests that need to look at a whole frame.

use super::scene::{DrawCommand, Scene, TextAlign, build_scene};
use super::{RenderSink, Snapshot};

/// Character-grid render sink
#[derive(Debug, Clone)]
pub struct AsciiSink {
    columns: usize,
    rows: usize,
    frame: String,
    frames_rendered: u64,
}

impl AsciiSink {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
            frame: String::new(),
            frames_rendered: 0,
        }
    }

    /// Most recently rendered frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Rasterize a scene into a multi-line string
    pub fn rasterize(&self, scene: &Scene) -> String {
        let mut grid = vec![vec![' '; self.columns]; self.rows];
        let sx = self.columns as f32 / scene.width;
        let sy = self.rows as f32 / scene.height;

        for command in &scene.commands {
            match command {
                DrawCommand::Clear { .. } => {
                    grid.iter_mut().for_each(|row| row.fill(' '));
                }
                DrawCommand::Rect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    glyph,
                } => {
                    // Translucent overlays only dim on real displays
                    if color.a < 1.0 {
                        continue;
                    }
                    let (c0, c1) = span(*x * sx, (*x + *w) * sx, self.columns);
                    let (r0, r1) = span(*y * sy, (*y + *h) * sy, self.rows);
                    for row in &mut grid[r0..r1] {
                        row[c0..c1].fill(*glyph);
                    }
                }
                DrawCommand::Circle { x, y, .. } => {
                    let (c, r) = ((*x * sx) as usize, (*y * sy) as usize);
                    if r < self.rows && c < self.columns {
                        grid[r][c] = 'O';
                    }
                }
                DrawCommand::Text {
                    x, y, text, align, ..
                } => {
                    let r = (*y * sy) as usize;
                    if r >= self.rows {
                        continue;
                    }
                    let len = text.chars().count();
                    let anchor = (*x * sx) as usize;
                    let start = match align {
                        TextAlign::Left => anchor,
                        TextAlign::Center => anchor.saturating_sub(len / 2),
                    };
                    for (i, ch) in text.chars().enumerate() {
                        if let Some(cell) = grid[r].get_mut(start + i) {
                            *cell = ch;
                        }
                    }
                }
            }
        }

        let border = format!("+{}+", "-".repeat(self.columns));
        let mut out = format!(
            "Level: {}  Lives: {}  Score: {}\n{}\n",
            scene.hud.level, scene.hud.lives, scene.hud.score, border
        );
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }
}

/// Cell range covered by [start, end) in grid units, at least one cell wide
fn span(start: f32, end: f32, limit: usize) -> (usize, usize) {
    let lo = (start.max(0.0).floor() as usize).min(limit);
    let hi = (end.max(0.0).ceil() as usize).clamp(lo, limit);
    if hi == lo && lo < limit {
        (lo, lo + 1)
    } else {
        (lo, hi)
    }
}

impl RenderSink for AsciiSink {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        let scene = build_scene(snapshot);
        self.frame = self.rasterize(&scene);
        self.frames_rendered += 1;
    }
}
