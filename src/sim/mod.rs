//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod stacking;
pub mod state;
pub mod tick;

pub use collision::{BounceAxis, BounceOutcome, correct_overlap, predict_collisions};
pub use rect::{Rect, span_overlaps, swept_bounds};
pub use state::{Block, BlockKind, GameEvent, Projectile, SimState, SpentBody};
pub use tick::{generate_blocks, generate_level, tick};
