//! Fixed timestep simulation tick
//!
//! Orchestrates one 60 Hz step: settle falling boxes, settle spent ducks,
//! then resolve the live duck's overlap and swept collisions before
//! integrating its motion. Box settling always runs first so the duck never
//! tests against stale positions.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{correct_overlap, predict_collisions};
use super::stacking;
use super::state::{Block, BlockKind, GameEvent, Projectile, SimState, SpentBody};
use crate::consts::*;

/// Advance the simulation by one fixed timestep
///
/// Mutates the box list, projectile and spent-body list in place and returns
/// the tick's events for the host's audio/rendering/level layers.
pub fn tick(state: &mut SimState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.stack_dirty {
        stacking::refresh_initial_tops(&mut state.blocks);
        state.stack_dirty = false;
    }
    stacking::settle_blocks(&mut state.blocks, state.tuning.gravity);

    if stacking::settle_spent(
        &mut state.spent,
        &mut state.blocks,
        state.tuning.gravity,
        &mut events,
    ) {
        state.stack_dirty = true;
    }

    if state.projectile.in_flight {
        correct_overlap(
            &mut state.projectile,
            &state.blocks,
            &state.tuning,
            &mut events,
        );

        let blocks_before = state.blocks.len();
        predict_collisions(
            &mut state.projectile,
            &mut state.blocks,
            &state.tuning,
            &mut events,
        );
        if state.blocks.len() != blocks_before {
            state.stack_dirty = true;
        }

        state.projectile.pos += state.projectile.vel;
        state.projectile.vel.y -= state.tuning.gravity;

        // Both landing triggers are live: ground contact, or flight that has
        // stayed slow for longer than the settle duration
        let vel = state.projectile.vel;
        if vel.x.abs() <= state.tuning.slow_speed_x && vel.y.abs() <= state.tuning.slow_speed_y {
            state.slow_timer += dt;
        } else {
            state.slow_timer = 0.0;
        }
        if state.projectile.pos.y <= GROUND_LEVEL || state.slow_timer > state.tuning.settle_secs {
            state.spent.push(SpentBody {
                rect: state.projectile.rect(),
                vy: 0.0,
            });
            state.projectile = Projectile::at_launch();
            state.slow_timer = 0.0;
            events.push(GameEvent::Landed);
        }
    }

    // Terminal events latch once per level; clearing fires the tick the last
    // target dies, even mid-flight
    if !state.outcome_sent {
        if !state.targets_remaining() {
            state.outcome_sent = true;
            log::info!("level {} cleared", state.level);
            events.push(GameEvent::LevelCleared);
        } else if state.ducks == 0 && !state.projectile.in_flight {
            state.outcome_sent = true;
            log::info!(
                "level {} failed, {} levels passed",
                state.level,
                state.levels_passed
            );
            events.push(GameEvent::LevelFailed);
        }
    }

    events
}

/// Create `quantity` randomly placed boxes on the integer grid
///
/// The first half are targets spawned high, the rest obstacles spawned low,
/// which keeps randomly generated levels passable.
pub fn generate_blocks(rng: &mut Pcg32, quantity: u32) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(quantity as usize);
    for i in 0..quantity {
        let x = rng.random_range(SPAWN_X_MIN..=SPAWN_X_MAX) as f32;
        let (kind, y) = if i < quantity / 2 {
            (
                BlockKind::Target,
                rng.random_range(TARGET_Y_MIN..=TARGET_Y_MAX) as f32,
            )
        } else {
            (
                BlockKind::Obstacle,
                rng.random_range(OBSTACLE_Y_MIN..=OBSTACLE_Y_MAX) as f32,
            )
        };
        blocks.push(Block::new(kind, x, y));
    }
    blocks
}

/// Generate and install random level `level` (1-based)
///
/// Level N has 2N boxes and grants one duck per box, capped at `MAX_DUCKS`.
pub fn generate_level(state: &mut SimState, level: u32) {
    let mut rng = Pcg32::seed_from_u64(state.seed.wrapping_add(level as u64));
    let blocks = generate_blocks(&mut rng, level * 2);
    let ducks = (level * 2).min(MAX_DUCKS);
    log::info!("level {}: {} boxes, {} ducks", level, blocks.len(), ducks);

    state.level = level;
    state.levels_passed = level.saturating_sub(1);
    state.load_blocks(blocks, ducks);
}
