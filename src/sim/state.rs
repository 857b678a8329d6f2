//! Simulation state and core types
//!
//! Everything that must survive a save/resume lives here, serde-derived and
//! owned by a single `SimState` that the tick driver mutates in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::BounceAxis;
use super::rect::Rect;
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Box types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Destroyed on contact with the duck or a spent duck
    Target,
    /// Bounced off, never destroyed
    Obstacle,
}

/// A box in the play field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub rect: Rect,
    /// Descent speed (>= 0, applied downward)
    pub vy: f32,
    /// Top edge recorded at the start of the current stacking resolution.
    /// Orders fall-blocking checks within a tick; refreshed whenever the
    /// block set changes membership.
    #[serde(skip)]
    pub initial_top: f32,
}

impl Block {
    pub fn new(kind: BlockKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            rect: Rect::new(x, y, BOX_SIZE, BOX_SIZE),
            vy: 0.0,
            initial_top: 0.0,
        }
    }
}

/// The launched duck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Bottom-left corner
    pub pos: Vec2,
    /// Fixed footprint
    pub size: Vec2,
    /// Per-tick velocity, positive Y = upward
    pub vel: Vec2,
    pub in_flight: bool,
}

impl Projectile {
    /// The duck at rest in the sling
    pub fn at_launch() -> Self {
        Self {
            pos: Vec2::new(LAUNCH_X, LAUNCH_Y),
            size: Vec2::splat(DUCK_SIZE),
            vel: Vec2::ZERO,
            in_flight: false,
        }
    }

    /// Current bounding rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A duck that has landed: falls and crushes targets but no longer bounces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpentBody {
    pub rect: Rect,
    /// Descent speed, same convention as `Block::vy`
    pub vy: f32,
}

/// Events produced by a simulation tick, consumed by the host's
/// rendering/audio/level layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A target box was destroyed
    TargetDestroyed { block: Block },
    /// The duck bounced off an obstacle hard enough to be audible
    Bounced { axis: BounceAxis, speed: f32 },
    /// The duck landed and became a spent body
    Landed,
    /// Every target is gone
    LevelCleared,
    /// Out of ducks with targets still standing
    LevelFailed,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Seed for reproducible level generation
    pub seed: u64,
    /// Current random level number (1-based, 0 = none loaded)
    pub level: u32,
    /// Random levels passed so far
    pub levels_passed: u32,
    /// Ducks left to launch
    pub ducks: u32,
    pub projectile: Projectile,
    pub blocks: Vec<Block>,
    pub spent: Vec<SpentBody>,
    pub tuning: Tuning,
    /// Seconds of sustained slow flight
    pub(crate) slow_timer: f32,
    /// Set when block membership changes; forces a stacking-order refresh
    pub(crate) stack_dirty: bool,
    /// Latched once the level has produced its terminal event
    pub(crate) outcome_sent: bool,
}

impl SimState {
    /// Create an empty simulation with the given generation seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            level: 0,
            levels_passed: 0,
            ducks: 0,
            projectile: Projectile::at_launch(),
            blocks: Vec::new(),
            spent: Vec::new(),
            tuning: Tuning::default(),
            slow_timer: 0.0,
            stack_dirty: false,
            // No level loaded yet, so no outcome to report
            outcome_sent: true,
        }
    }

    /// Install a block set and duck budget for a new level
    ///
    /// Resets the projectile to the sling and clears spent ducks from the
    /// previous level.
    pub fn load_blocks(&mut self, blocks: Vec<Block>, ducks: u32) {
        self.blocks = blocks;
        self.ducks = ducks;
        self.spent.clear();
        self.projectile = Projectile::at_launch();
        self.slow_timer = 0.0;
        self.stack_dirty = true;
        self.outcome_sent = false;
    }

    /// Launch the duck with the given force and angle (radians)
    ///
    /// No-op while a duck is already in flight or none remain.
    pub fn launch(&mut self, force: f32, angle: f32) {
        if self.projectile.in_flight || self.ducks == 0 {
            return;
        }
        self.projectile.vel = polar_to_cartesian(force * self.tuning.force_factor, angle);
        self.projectile.in_flight = true;
        self.ducks -= 1;
    }

    /// Whether any target boxes are still standing
    pub fn targets_remaining(&self) -> bool {
        self.blocks.iter().any(|b| b.kind == BlockKind::Target)
    }
}
