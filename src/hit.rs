#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::scenario::{Entity, EntityId};
use crate::viewport::Point;

/// How a pointer-down landed on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// The already-selected entity was grabbed again within the re-grab radius.
    Regrab(EntityId),
    /// A fresh hit; the entity becomes selected.
    Pick(EntityId),
}

impl Hit {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Regrab(id) | Self::Pick(id) => id,
        }
    }
}

/// Radii used by [`hit_test`], in world units.
#[derive(Debug, Clone, Copy)]
pub struct HitRadii {
    pub regrab: f64,
    pub default: f64,
}

/// Find the entity under `world_pt`.
///
/// The selected entity wins if the pointer is within `radii.regrab` of its
/// current position, so a token can be picked up again from a generous
/// distance. Otherwise entities are tested topmost first (reverse list
/// order) against their own `radius`, or `radii.default` when unset.
#[must_use]
pub fn hit_test(world_pt: Point, entities: &[Entity], selected: Option<&str>, radii: HitRadii) -> Option<Hit> {
    if let Some(sel) = selected {
        if let Some(ent) = entities.iter().find(|e| e.id == sel) {
            if ent.position().distance(world_pt) < radii.regrab {
                return Some(Hit::Regrab(ent.id.clone()));
            }
        }
    }

    entities
        .iter()
        .rev()
        .find(|e| e.position().distance(world_pt) < e.radius.unwrap_or(radii.default))
        .map(|e| Hit::Pick(e.id.clone()))
}
