//! Data-driven physics balance
//!
//! Kept separate from simulation state so hosts can tweak the feel without
//! touching the engine. Defaults reproduce the shipped game.

use serde::{Deserialize, Serialize};

/// Physics tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Downward acceleration applied each tick, in pixels/tick²
    pub gravity: f32,
    /// Fraction of speed retained on the bounced axis (0 < e < 1)
    pub elasticity: f32,
    /// Scales launch force into per-tick velocity
    pub force_factor: f32,
    /// Horizontal speed at or below which flight counts as slow
    pub slow_speed_x: f32,
    /// Vertical speed at or below which flight counts as slow
    pub slow_speed_y: f32,
    /// Seconds of sustained slow flight before the duck settles
    pub settle_secs: f32,
    /// Minimum post-bounce horizontal speed for an audible bounce
    pub bounce_audible_x: f32,
    /// Minimum post-bounce vertical speed for an audible bounce
    pub bounce_audible_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.5,
            elasticity: 0.5,
            force_factor: 0.6,
            slow_speed_x: 1.5,
            slow_speed_y: 2.5,
            settle_secs: 0.1,
            bounce_audible_x: 1.0,
            bounce_audible_y: 2.0,
        }
    }
}
