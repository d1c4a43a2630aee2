#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;

use crate::scenario::{Entity, Step};

/// Entity positions `t` of the way from `from` to `to`.
///
/// Entities are matched by id. One missing from `to` holds its `from`
/// position. Output order and every non-positional field follow `from`.
#[must_use]
pub fn interpolate(from: &Step, to: &Step, t: f64) -> Vec<Entity> {
    from.entities
        .iter()
        .map(|start| {
            let Some(end) = to.entity(&start.id) else {
                return start.clone();
            };
            Entity {
                x: lerp(start.x, end.x, t),
                y: lerp(start.y, end.y, t),
                ..start.clone()
            }
        })
        .collect()
}

#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
