//! Gravity settling for free-falling boxes and spent ducks
//!
//! Boxes fall until they rest on the ground or on a box beneath them. Support
//! checks run lowest-first, and a box may only be supported by one whose
//! recorded top edge is no higher than its own; that keeps a falling pile
//! from propping itself up on boxes above it.

use super::rect::{Rect, span_overlaps};
use super::state::{Block, BlockKind, GameEvent, SpentBody};
use crate::consts::GROUND_LEVEL;

/// Re-record the stacking-order keys from current top edges
///
/// Must run whenever the block set changes membership, before the next
/// settling pass.
pub(crate) fn refresh_initial_tops(blocks: &mut [Block]) {
    for block in blocks.iter_mut() {
        block.initial_top = block.rect.top();
    }
}

/// Advance every block one tick under gravity
///
/// Never fails: degenerate input (zero-size boxes) settles without crashing.
pub fn settle_blocks(blocks: &mut [Block], gravity: f32) {
    blocks.sort_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));

    for i in 0..blocks.len() {
        if blocks[i].rect.y <= GROUND_LEVEL {
            blocks[i].rect.y = GROUND_LEVEL;
            blocks[i].vy = 0.0;
            continue;
        }

        let mut falling = true;
        for j in 0..blocks.len() {
            if i == j {
                continue;
            }
            let other_initial = blocks[j].initial_top;
            if blocks[i].initial_top < other_initial {
                continue;
            }
            if blocks[i].initial_top == other_initial {
                // Force a strict order; mutual support would hang the pile
                blocks[i].initial_top += 1.0;
            }
            let rect = blocks[i].rect;
            let other = blocks[j].rect;
            if span_overlaps(rect.left(), rect.right(), rect.bottom(), rect.top(), &other)
                // A pure side-touch is adjacency, not support
                && rect.left() != other.right()
                && rect.right() != other.left()
            {
                blocks[i].rect.y = other.top();
                blocks[i].vy = 0.0;
                falling = false;
            }
        }

        if falling {
            blocks[i].vy += gravity;
            blocks[i].rect.y -= blocks[i].vy;
        }
    }
}

/// Drop spent ducks one tick; they crush targets while settling
///
/// Returns true if any target was destroyed, so the caller can refresh the
/// stacking order.
pub fn settle_spent(
    spent: &mut [SpentBody],
    blocks: &mut Vec<Block>,
    gravity: f32,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut destroyed_any = false;
    for body in spent.iter_mut() {
        destroyed_any |= destroy_targets(&body.rect, blocks, events);

        if body.rect.y <= GROUND_LEVEL {
            body.rect.y = GROUND_LEVEL;
            body.vy = 0.0;
            continue;
        }
        let mut falling = true;
        for block in blocks.iter() {
            if body.rect.overlaps(&block.rect) {
                body.rect.y = block.rect.top();
                body.vy = 0.0;
                falling = false;
            }
        }
        if falling {
            body.vy += gravity;
            body.rect.y -= body.vy;
        }
    }
    destroyed_any
}

/// Remove every target overlapping `area`, emitting a destruction event each
///
/// Removal goes through the full list rebuild, so a target already gone this
/// tick is simply not found again (no double-destroy).
pub fn destroy_targets(area: &Rect, blocks: &mut Vec<Block>, events: &mut Vec<GameEvent>) -> bool {
    let before = blocks.len();
    let mut kept = Vec::with_capacity(before);
    for block in blocks.drain(..) {
        if block.kind == BlockKind::Target && area.overlaps(&block.rect) {
            events.push(GameEvent::TargetDestroyed { block });
        } else {
            kept.push(block);
        }
    }
    *blocks = kept;
    blocks.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BOX_SIZE;

    const GRAVITY: f32 = 1.5;

    fn settle_loaded(blocks: &mut Vec<Block>, ticks: u32) {
        refresh_initial_tops(blocks);
        for _ in 0..ticks {
            settle_blocks(blocks, GRAVITY);
        }
    }

    #[test]
    fn test_grounded_boxes_stay_put() {
        let mut blocks = vec![
            Block::new(BlockKind::Obstacle, 400.0, GROUND_LEVEL),
            Block::new(BlockKind::Target, 600.0, GROUND_LEVEL),
        ];
        settle_loaded(&mut blocks, 10);
        for block in &blocks {
            assert_eq!(block.rect.y, GROUND_LEVEL);
            assert_eq!(block.vy, 0.0);
        }
    }

    #[test]
    fn test_unsupported_box_strictly_descends() {
        let mut blocks = vec![Block::new(BlockKind::Obstacle, 400.0, 500.0)];
        refresh_initial_tops(&mut blocks);
        let mut last_y = 500.0;
        for _ in 0..5 {
            settle_blocks(&mut blocks, GRAVITY);
            assert!(blocks[0].rect.y < last_y);
            last_y = blocks[0].rect.y;
        }
    }

    #[test]
    fn test_fall_accelerates() {
        let mut blocks = vec![Block::new(BlockKind::Obstacle, 400.0, 1000.0)];
        refresh_initial_tops(&mut blocks);
        settle_blocks(&mut blocks, GRAVITY);
        assert_eq!(blocks[0].vy, GRAVITY);
        settle_blocks(&mut blocks, GRAVITY);
        assert_eq!(blocks[0].vy, 2.0 * GRAVITY);
    }

    #[test]
    fn test_identical_footprints_stack() {
        // Two boxes dropped over the same column: the lower grounds, the
        // upper comes to rest exactly on top of it.
        let mut blocks = vec![
            Block::new(BlockKind::Obstacle, 400.0, 200.0),
            Block::new(BlockKind::Obstacle, 400.0, 400.0),
        ];
        settle_loaded(&mut blocks, 60);

        blocks.sort_by(|a, b| a.rect.y.total_cmp(&b.rect.y));
        let (lower, upper) = (&blocks[0], &blocks[1]);
        assert_eq!(lower.rect.y, GROUND_LEVEL);
        assert_eq!(upper.rect.y, lower.rect.top());
        assert_eq!(upper.vy, 0.0);
    }

    #[test]
    fn test_side_touch_is_not_support() {
        // A falling box whose left edge exactly matches a grounded box's
        // right edge must slide past it to the ground.
        let mut blocks = vec![
            Block::new(BlockKind::Obstacle, 400.0, GROUND_LEVEL),
            Block::new(BlockKind::Obstacle, 400.0 + BOX_SIZE, 300.0),
        ];
        settle_loaded(&mut blocks, 60);

        for block in &blocks {
            assert_eq!(block.rect.y, GROUND_LEVEL);
        }
    }

    #[test]
    fn test_settling_is_idempotent_at_rest() {
        let mut blocks = vec![
            Block::new(BlockKind::Obstacle, 400.0, 200.0),
            Block::new(BlockKind::Obstacle, 400.0, 400.0),
            Block::new(BlockKind::Target, 700.0, 350.0),
        ];
        settle_loaded(&mut blocks, 120);
        let settled: Vec<Rect> = blocks.iter().map(|b| b.rect).collect();
        settle_loaded(&mut blocks, 30);
        let after: Vec<Rect> = blocks.iter().map(|b| b.rect).collect();
        assert_eq!(after, settled);
    }

    #[test]
    fn test_spent_body_crushes_target_and_grounds() {
        let mut blocks = vec![Block::new(BlockKind::Target, 400.0, GROUND_LEVEL)];
        let mut spent = vec![SpentBody {
            rect: Rect::new(400.0, 300.0, 40.0, 40.0),
            vy: 0.0,
        }];
        let mut events = Vec::new();

        let mut destroyed = false;
        for _ in 0..60 {
            destroyed |= settle_spent(&mut spent, &mut blocks, GRAVITY, &mut events);
        }
        assert!(destroyed);
        assert!(blocks.is_empty());
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::TargetDestroyed { .. }))
        );
        assert_eq!(spent[0].rect.y, GROUND_LEVEL);
    }

    #[test]
    fn test_spent_body_rests_on_obstacle() {
        let mut blocks = vec![Block::new(BlockKind::Obstacle, 400.0, GROUND_LEVEL)];
        let mut spent = vec![SpentBody {
            rect: Rect::new(410.0, 300.0, 40.0, 40.0),
            vy: 0.0,
        }];
        let mut events = Vec::new();

        for _ in 0..60 {
            settle_spent(&mut spent, &mut blocks, GRAVITY, &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(spent[0].rect.y, blocks[0].rect.top());
    }

    #[test]
    fn test_destroy_targets_spares_obstacles() {
        let mut blocks = vec![
            Block::new(BlockKind::Target, 100.0, 100.0),
            Block::new(BlockKind::Obstacle, 100.0, 100.0),
            Block::new(BlockKind::Target, 900.0, 100.0),
        ];
        let mut events = Vec::new();
        let area = Rect::new(90.0, 90.0, 60.0, 60.0);

        assert!(destroy_targets(&area, &mut blocks, &mut events));
        assert_eq!(blocks.len(), 2);
        assert_eq!(events.len(), 1);
        assert!(blocks.iter().any(|b| b.kind == BlockKind::Obstacle));

        // Second pass over the same area finds nothing: removal is a no-op
        assert!(!destroy_targets(&area, &mut blocks, &mut events));
        assert_eq!(events.len(), 1);
    }
}
