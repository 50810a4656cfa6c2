//! Steering: bias the wandering head toward the nearest target.
//!
//! Distances are plain Manhattan distances on the grid, not torus-aware,
//! so the head occasionally takes the long way round. That is fine for a
//! background effect and matches how the trail reads on screen.

use crate::cell::{CellPos, Heading};

/// Closest target by Manhattan distance. The first of several equidistant
/// targets wins.
#[must_use]
pub fn nearest_target(head: CellPos, targets: &[CellPos]) -> Option<CellPos> {
    targets
        .iter()
        .copied()
        .min_by_key(|target| head.manhattan(*target))
}

/// Single-axis step toward `target` along the axis with the larger delta.
/// Equal deltas give no preference.
#[must_use]
pub fn seek(head: CellPos, target: CellPos) -> Option<Heading> {
    let dx = target.x - head.x;
    let dy = target.y - head.y;
    if dx.abs() > dy.abs() {
        Some(if dx > 0 { Heading::Right } else { Heading::Left })
    } else if dy.abs() > dx.abs() {
        Some(if dy > 0 { Heading::Down } else { Heading::Up })
    } else {
        None
    }
}

/// Apply a proposed heading, refusing an about-face once the body has a neck.
#[must_use]
pub fn turn(current: Heading, proposed: Heading, body_len: usize) -> Heading {
    if body_len > 1 && current.is_opposite(proposed) {
        current
    } else {
        proposed
    }
}

/// Heading after one steering decision.
#[must_use]
pub fn steer(head: CellPos, current: Heading, body_len: usize, targets: &[CellPos]) -> Heading {
    nearest_target(head, targets)
        .and_then(|target| seek(head, target))
        .map_or(current, |proposed| turn(current, proposed, body_len))
}
