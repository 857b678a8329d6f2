//! Swept collision prediction and overlap correction for the duck
//!
//! The tricky part of the game: per-tick swept-rectangle tests against a
//! field of boxes that is itself settling, directional tie-breaking among
//! simultaneous hits, and reflection with energy loss. Targets in the path
//! are destroyed in distance order; at most one obstacle becomes the bounce
//! surface per tick.

use serde::{Deserialize, Serialize};

use super::rect::{Rect, span_overlaps, swept_bounds};
use super::state::{Block, BlockKind, GameEvent, Projectile};
use crate::tuning::Tuning;
use crate::{direction_angle, distance, polar_to_cartesian};

/// Below this the travel direction counts as perpendicular to the tested
/// edge and the ray length falls back to the raw coordinate delta
const RAY_EPSILON: f32 = 1e-6;

/// Axis a bounce resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BounceAxis {
    Horizontal,
    Vertical,
}

/// Result of a bounce resolution
///
/// Explicit, so callers cannot mistake "no bounce this tick" for an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BounceOutcome {
    /// No obstacle surface was reached this tick
    Miss,
    /// The duck was repositioned onto an obstacle surface and its velocity
    /// reflected and damped
    Bounced { axis: BounceAxis, speed: f32 },
}

/// Sides of an obstacle another box can sit flush against
#[derive(Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
    Above,
}

/// Ray length along the travel angle needed to cover `delta` on one axis
///
/// `trig` is the cosine (horizontal edges) or sine (vertical edges) of the
/// travel angle. Exactly axis-aligned travel makes it vanish; the fallback
/// coordinate delta is used instead of dividing by it.
fn ray_length(delta: f32, trig: f32, fallback: f32) -> f32 {
    if trig.abs() < RAY_EPSILON {
        fallback.abs()
    } else {
        (delta / trig).abs()
    }
}

/// Project the duck along `angle` by `ray` and accept the move only if the
/// moved rectangle still overlaps the obstacle, i.e. it lands exactly on the
/// surface rather than past it
///
/// On acceptance the bounced axis is reflected and damped; a vertical bounce
/// also scrubs horizontal speed to model the oblique contact. Returns `None`
/// when the candidate position misses, leaving the duck untouched.
fn try_bounce(
    duck: &mut Projectile,
    obstacle: &Rect,
    angle: f32,
    ray: f32,
    axis: BounceAxis,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Option<BounceOutcome> {
    let moved = duck.pos + polar_to_cartesian(ray, angle);
    let test = Rect::new(moved.x, moved.y, duck.size.x, duck.size.y);
    if !test.overlaps(obstacle) {
        return None;
    }

    duck.pos = moved;
    let e = tuning.elasticity;
    match axis {
        BounceAxis::Horizontal => {
            duck.vel.x = -e * duck.vel.x;
        }
        BounceAxis::Vertical => {
            duck.vel.y = -e * duck.vel.y;
            duck.vel.x *= e;
        }
    }

    if duck.vel.x.abs() > tuning.bounce_audible_x || duck.vel.y.abs() > tuning.bounce_audible_y {
        events.push(GameEvent::Bounced {
            axis,
            speed: duck.vel.length(),
        });
    }
    Some(BounceOutcome::Bounced {
        axis,
        speed: duck.vel.length(),
    })
}

/// Resolve the upcoming tick's collisions along the duck's swept path
///
/// Every target closer than the first obstacle on the path is destroyed (one
/// `TargetDestroyed` event each). The first obstacle, if any, is tested as a
/// bounce surface: horizontal deflection first, then vertical, each candidate
/// position verified by re-testing containment against the obstacle.
pub fn predict_collisions(
    duck: &mut Projectile,
    blocks: &mut Vec<Block>,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> BounceOutcome {
    let duck_rect = duck.rect();
    let (min_x, max_x, min_y, max_y) = swept_bounds(&duck_rect, duck.vel);

    let mut candidates: Vec<usize> = (0..blocks.len())
        .filter(|&i| span_overlaps(min_x, max_x, min_y, max_y, &blocks[i].rect))
        .collect();
    candidates.sort_by(|&a, &b| {
        let da = distance(duck.pos, blocks[a].rect.pos());
        let db = distance(duck.pos, blocks[b].rect.pos());
        da.total_cmp(&db)
    });

    // Walk closest-first: targets in the path are destroyed until the bounce
    // surface appears
    let mut obstacle: Option<Rect> = None;
    let mut destroyed: Vec<usize> = Vec::new();
    for &i in &candidates {
        match blocks[i].kind {
            BlockKind::Target => destroyed.push(i),
            BlockKind::Obstacle => {
                obstacle = Some(blocks[i].rect);
                break;
            }
        }
    }
    destroyed.sort_unstable_by(|a, b| b.cmp(a));
    for i in destroyed {
        let block = blocks.remove(i);
        events.push(GameEvent::TargetDestroyed { block });
    }

    let Some(obstacle) = obstacle else {
        return BounceOutcome::Miss;
    };

    let angle = direction_angle(duck.pos, duck.pos + duck.vel);
    let rect = duck.rect();

    // Horizontal before vertical; the leading edge must not have passed the
    // obstacle's facing edge yet
    if duck.vel.x >= 0.0 && rect.right() <= obstacle.left() {
        let ray = ray_length(
            obstacle.left() - duck.size.x - duck.pos.x,
            angle.cos(),
            duck.pos.y - obstacle.y,
        );
        if let Some(outcome) = try_bounce(
            duck,
            &obstacle,
            angle,
            ray,
            BounceAxis::Horizontal,
            tuning,
            events,
        ) {
            return outcome;
        }
    } else if duck.vel.x <= 0.0 && rect.left() >= obstacle.right() {
        let ray = ray_length(
            duck.pos.x - obstacle.right(),
            angle.cos(),
            duck.pos.y - obstacle.y,
        );
        if let Some(outcome) = try_bounce(
            duck,
            &obstacle,
            angle,
            ray,
            BounceAxis::Horizontal,
            tuning,
            events,
        ) {
            return outcome;
        }
    }

    if duck.vel.y <= 0.0 && rect.bottom() >= obstacle.top() {
        let ray = ray_length(
            duck.pos.y - obstacle.top(),
            angle.sin(),
            duck.pos.x - obstacle.x,
        );
        if let Some(outcome) = try_bounce(
            duck,
            &obstacle,
            angle,
            ray,
            BounceAxis::Vertical,
            tuning,
            events,
        ) {
            return outcome;
        }
    } else if duck.vel.y >= 0.0 && rect.top() <= obstacle.bottom() {
        let ray = ray_length(
            obstacle.bottom() - duck.size.y - duck.pos.y,
            angle.sin(),
            duck.pos.x - obstacle.x,
        );
        if let Some(outcome) = try_bounce(
            duck,
            &obstacle,
            angle,
            ray,
            BounceAxis::Vertical,
            tuning,
            events,
        ) {
            return outcome;
        }
    }

    BounceOutcome::Miss
}

/// Push the duck out of an obstacle it is already interpenetrating
///
/// Runs before prediction each tick as a safety net against tunneling and
/// stacking edge cases. Adjacency picks the escape side: a sideways push is
/// only tried into a gap that actually exists; with a box flush against that
/// side the duck goes up and over the obstacle instead.
pub fn correct_overlap(
    duck: &mut Projectile,
    blocks: &[Block],
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> BounceOutcome {
    let rect = duck.rect();
    let Some(obs_idx) = blocks
        .iter()
        .position(|b| b.kind == BlockKind::Obstacle && rect.overlaps(&b.rect))
    else {
        return BounceOutcome::Miss;
    };
    let obstacle = blocks[obs_idx].rect;

    let angle = direction_angle(duck.pos, duck.pos + duck.vel);

    if duck.vel.x >= 0.0 && !adjacent_on(blocks, obs_idx, Side::Left) {
        let ray = ray_length(
            obstacle.left() - duck.size.x - duck.pos.x,
            angle.cos(),
            duck.pos.y - obstacle.y,
        );
        if let Some(outcome) = try_bounce(
            duck,
            &obstacle,
            angle,
            ray,
            BounceAxis::Horizontal,
            tuning,
            events,
        ) {
            return outcome;
        }
    } else if duck.vel.x <= 0.0 && !adjacent_on(blocks, obs_idx, Side::Right) {
        let ray = ray_length(
            duck.pos.x - obstacle.right(),
            angle.cos(),
            duck.pos.y - obstacle.y,
        );
        if let Some(outcome) = try_bounce(
            duck,
            &obstacle,
            angle,
            ray,
            BounceAxis::Horizontal,
            tuning,
            events,
        ) {
            return outcome;
        }
    }

    if duck.vel.y <= 0.0 && !adjacent_on(blocks, obs_idx, Side::Above) {
        let ray = ray_length(
            duck.pos.y - obstacle.top(),
            angle.sin(),
            duck.pos.x - obstacle.x,
        );
        if let Some(outcome) = try_bounce(
            duck,
            &obstacle,
            angle,
            ray,
            BounceAxis::Vertical,
            tuning,
            events,
        ) {
            return outcome;
        }
    }

    BounceOutcome::Miss
}

/// Whether another box sits flush against the given side of `blocks[skip]`
///
/// Flush means the facing edges match exactly and the boxes line up on the
/// perpendicular axis, the way settled stacks and rows come to rest.
fn adjacent_on(blocks: &[Block], skip: usize, side: Side) -> bool {
    let rect = blocks[skip].rect;
    blocks.iter().enumerate().any(|(i, other)| {
        if i == skip {
            return false;
        }
        let o = other.rect;
        match side {
            Side::Left => {
                o.right() == rect.left() && (o.bottom() == rect.bottom() || o.top() == rect.top())
            }
            Side::Right => {
                o.left() == rect.right() && (o.bottom() == rect.bottom() || o.top() == rect.top())
            }
            Side::Above => {
                o.bottom() == rect.top() && (o.left() == rect.left() || o.right() == rect.right())
            }
        }
    })
}
