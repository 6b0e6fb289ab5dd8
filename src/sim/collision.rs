//! Collision tests for axis-aligned playfield geometry
//!
//! Walls and the paddle use look-ahead: the test asks whether the ball's
//! *next* position (current position + velocity) crosses a boundary, and the
//! caller flips the velocity. The ball may sit slightly inside a wall for a
//! frame before the flipped velocity carries it out.
//!
//! Bricks use the ball's center point only, not the radius-expanded circle.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::state::Paddle;
use crate::consts::POWER_UP_SIZE;

/// Would the next horizontal position leave the playfield at either side?
#[inline]
pub fn crosses_side_wall(x: f32, dx: f32, radius: f32, width: f32) -> bool {
    x + dx > width - radius || x + dx < radius
}

/// Would the next vertical position leave through the top?
#[inline]
pub fn crosses_top_wall(y: f32, dy: f32, radius: f32) -> bool {
    y + dy < radius
}

/// Would the next vertical position leave through the bottom?
#[inline]
pub fn crosses_bottom(y: f32, dy: f32, radius: f32, height: f32) -> bool {
    y + dy > height - radius
}

/// Paddle contact: the next vertical position enters the paddle band and the
/// current horizontal position lies strictly within the paddle's span.
pub fn hits_paddle(
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    paddle: &Paddle,
    paddle_width: f32,
    height: f32,
) -> bool {
    pos.y + vel.y > height - radius - paddle.height
        && pos.x > paddle.pos.x
        && pos.x < paddle.pos.x + paddle_width
}

/// Strict point-in-rectangle test (points on the edge are outside)
#[inline]
pub fn point_in_rect(point: Vec2, origin: Vec2, size: Vec2) -> bool {
    point.x > origin.x
        && point.x < origin.x + size.x
        && point.y > origin.y
        && point.y < origin.y + size.y
}

/// Where along the paddle the ball struck, 0 at the left edge and 1 at the right
#[inline]
pub fn hit_position(ball_x: f32, paddle_x: f32, paddle_width: f32) -> f32 {
    (ball_x - paddle_x) / paddle_width
}

/// Outgoing velocity after a paddle hit.
///
/// The launch angle is derived from the hit position, not reflected: center
/// hits go straight up, edge hits leave almost horizontally. The magnitude is
/// always exactly `speed`.
pub fn paddle_bounce_velocity(hit_position: f32, speed: f32) -> Vec2 {
    let angle = hit_position * PI - FRAC_PI_2;
    Vec2::new(angle.sin() * speed, -angle.cos() * speed)
}

/// Does a falling power-up touch the paddle?
pub fn power_up_touches_paddle(pos: Vec2, paddle: &Paddle, paddle_width: f32) -> bool {
    pos.y + POWER_UP_SIZE > paddle.pos.y
        && pos.y < paddle.pos.y + paddle.height
        && pos.x > paddle.pos.x
        && pos.x < paddle.pos.x + paddle_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SimConfig;
    use proptest::prelude::*;

    #[test]
    fn test_side_wall_lookahead() {
        // Moving right, next step passes width - radius
        assert!(crosses_side_wall(848.0, 5.0, 8.0, 860.0));
        // Moving left, next step passes radius
        assert!(crosses_side_wall(10.0, -3.0, 8.0, 860.0));
        // Comfortably inside
        assert!(!crosses_side_wall(400.0, 5.0, 8.0, 860.0));
        // Landing exactly on the boundary is not a crossing
        assert!(!crosses_side_wall(847.0, 5.0, 8.0, 860.0));
    }

    #[test]
    fn test_top_and_bottom() {
        assert!(crosses_top_wall(10.0, -3.0, 8.0));
        assert!(!crosses_top_wall(10.0, 3.0, 8.0));
        assert!(crosses_bottom(590.0, 4.0, 8.0, 600.0));
        assert!(!crosses_bottom(590.0, -4.0, 8.0, 600.0));
    }

    #[test]
    fn test_point_in_rect_is_strict() {
        let origin = Vec2::new(35.0, 50.0);
        let size = Vec2::new(70.0, 20.0);
        assert!(point_in_rect(Vec2::new(70.0, 60.0), origin, size));
        assert!(!point_in_rect(Vec2::new(35.0, 60.0), origin, size));
        assert!(!point_in_rect(Vec2::new(70.0, 70.0), origin, size));
        assert!(!point_in_rect(Vec2::new(200.0, 60.0), origin, size));
    }

    #[test]
    fn test_paddle_band() {
        let config = SimConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.pos.x = 380.0;

        // Next y = 583 > 600 - 8 - 10
        assert!(hits_paddle(
            Vec2::new(430.0, 579.0),
            Vec2::new(0.0, 4.0),
            8.0,
            &paddle,
            100.0,
            600.0
        ));
        // Outside the horizontal span
        assert!(!hits_paddle(
            Vec2::new(300.0, 579.0),
            Vec2::new(0.0, 4.0),
            8.0,
            &paddle,
            100.0,
            600.0
        ));
        // Wider paddle reaches it
        assert!(hits_paddle(
            Vec2::new(490.0, 579.0),
            Vec2::new(0.0, 4.0),
            8.0,
            &paddle,
            120.0,
            600.0
        ));
    }

    #[test]
    fn test_center_hit_goes_straight_up() {
        let vel = paddle_bounce_velocity(0.5, 5.0);
        assert!(vel.x.abs() < 1e-5);
        assert!((vel.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_edge_hits_go_sideways() {
        let left = paddle_bounce_velocity(0.0, 5.0);
        assert!((left.x + 5.0).abs() < 1e-5);
        assert!(left.y.abs() < 1e-5);

        let right = paddle_bounce_velocity(0.9, 5.0);
        assert!(right.x > 4.0);
        assert!(right.y < 0.0);
    }

    #[test]
    fn test_power_up_pickup_band() {
        let config = SimConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.pos.x = 100.0;

        assert!(power_up_touches_paddle(Vec2::new(150.0, 570.0), &paddle, 100.0));
        // Above the paddle
        assert!(!power_up_touches_paddle(Vec2::new(150.0, 560.0), &paddle, 100.0));
        // Left edge of the power-up must be inside the span
        assert!(!power_up_touches_paddle(Vec2::new(95.0, 570.0), &paddle, 100.0));
    }

    proptest! {
        #[test]
        fn prop_bounce_speed_is_exact(hit in 0.0f32..=1.0, speed in 1.0f32..20.0) {
            let vel = paddle_bounce_velocity(hit, speed);
            prop_assert!((vel.length() - speed).abs() < 1e-4);
            prop_assert!(vel.y <= 1e-4);
        }
    }
}
