//! Forward propagation of edit-mode changes.
//!
//! A drag at step `k` moves the dragged entity, and every entity attached
//! to it, by the same delta in steps `k..N`. Earlier steps are never touched:
//! an edit means "from now on", not "always".
//!
//! Zone resizes are the exception and stay on the step they were made on.

#[cfg(test)]
#[path = "propagate_test.rs"]
mod propagate_test;

use crate::scenario::{EntityKind, Step};
use crate::viewport::Point;

/// Apply `delta` to entity `id` and its followers in `steps[from..]`.
///
/// Returns the number of entity positions changed. Steps where `id` is
/// absent still move that step's followers.
pub fn propagate_drag(steps: &mut [Step], from: usize, id: &str, delta: Point) -> usize {
    let Some(tail) = steps.get_mut(from..) else {
        return 0;
    };
    let mut moved = 0;
    for step in tail {
        for entity in &mut step.entities {
            if entity.id == id || entity.attached_to.as_deref() == Some(id) {
                entity.translate(delta);
                moved += 1;
            }
        }
    }
    moved
}

/// Grow or shrink target zone `id` in a single step.
///
/// The new radius is `max(min_radius, current + delta)`, where a zone with no
/// radius counts as `default_radius`. Returns the new radius, or `None` if
/// `id` is missing or not a target zone.
pub fn resize_zone(step: &mut Step, id: &str, delta: f64, default_radius: f64, min_radius: f64) -> Option<f64> {
    let entity = step.entity_mut(id)?;
    if entity.kind != EntityKind::TargetZone {
        return None;
    }
    let radius = (entity.radius.unwrap_or(default_radius) + delta).max(min_radius);
    entity.radius = Some(radius);
    Some(radius)
}
