//! Miffed Ducks - ballistic duck-launcher physics core
//!
//! Core modules:
//! - `sim`: deterministic simulation (box stacking, swept collisions, game state)
//! - `tuning`: data-driven physics balance
//!
//! Rendering, audio playback, input handling and level-file I/O live in the
//! host application. This crate consumes launch commands and box sets, and
//! produces per-tick events (`sim::GameEvent`) plus mutated simulation state.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World width in pixels; the random generator spawns boxes near the far edge
    pub const WORLD_WIDTH: f32 = 1920.0;
    /// Y coordinate of the ground surface
    pub const GROUND_LEVEL: f32 = 80.0;

    /// Launch pose the duck returns to between shots
    pub const LAUNCH_X: f32 = 100.0;
    pub const LAUNCH_Y: f32 = 100.0 + GROUND_LEVEL;

    /// Duck and box footprints (square sprites)
    pub const DUCK_SIZE: f32 = 40.0;
    pub const BOX_SIZE: f32 = 40.0;

    /// Ducks granted per level are capped here
    pub const MAX_DUCKS: u32 = 16;

    /// Random level spawn bands (bottom-left corners, integer grid)
    pub const SPAWN_X_MIN: i32 = WORLD_WIDTH as i32 - 880;
    pub const SPAWN_X_MAX: i32 = WORLD_WIDTH as i32 - 60;
    /// Targets spawn high so random levels stay passable
    pub const TARGET_Y_MIN: i32 = 340;
    pub const TARGET_Y_MAX: i32 = 600;
    pub const OBSTACLE_Y_MIN: i32 = 80;
    pub const OBSTACLE_Y_MAX: i32 = 300;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Direction from `from` to `to` in radians, full `(-π, π]` range
///
/// Two-argument arctangent, so axis-aligned directions are unambiguous and
/// nothing divides by zero.
#[inline]
pub fn direction_angle(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Convert polar (ray, angle) to a cartesian displacement
#[inline]
pub fn polar_to_cartesian(ray: f32, angle: f32) -> Vec2 {
    Vec2::new(ray * angle.cos(), ray * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let d = distance(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_angle_quadrants() {
        use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
        let origin = Vec2::ZERO;
        assert!((direction_angle(origin, Vec2::new(1.0, 0.0)) - 0.0).abs() < 1e-6);
        assert!((direction_angle(origin, Vec2::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((direction_angle(origin, Vec2::new(-1.0, 0.0)) - PI).abs() < 1e-6);
        assert!((direction_angle(origin, Vec2::new(1.0, -1.0)) + FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_polar_round_trip() {
        // Reconstructing the vector from p1 to p2 out of (distance, angle)
        // must agree with the direct difference.
        let p1 = Vec2::new(12.5, -3.0);
        let p2 = Vec2::new(-40.0, 77.25);
        let v = polar_to_cartesian(distance(p1, p2), direction_angle(p1, p2));
        assert!((p1 + v - p2).length() < 1e-3);
    }
}
