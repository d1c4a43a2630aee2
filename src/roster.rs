//! Roster binding: display names and role text for the fixed player slots.
//!
//! Scenarios use well-known structural ids for players. The host supplies two
//! lists (attack, defend) of up to five entries each, mapped positionally:
//! outfield slots 1–4, then the goalkeeper.
//!
//! | Side | Ids | Slots |
//! |------|-----|-------|
//! | attack | `P1`..`P4`, `GK_A` | 0..=4 |
//! | defend | `D1`..`D4`, `GK_D` | 0..=4 |

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use serde::{Deserialize, Serialize};

use crate::scenario::{Entity, EntityKind};

/// Name the host uses for a slot it has not filled in yet.
pub const PLACEHOLDER_NAME: &str = "???";

/// Label drawn on every target zone.
pub const TARGET_LABEL: &str = "TARGET";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Attack,
    Defend,
}

/// One roster entry bound to a structural slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBinding {
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(default, alias = "instruction")]
    pub role_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterBinding {
    #[serde(default)]
    pub attack: Vec<PlayerBinding>,
    #[serde(default)]
    pub defend: Vec<PlayerBinding>,
}

/// Team names shown as pitch watermarks outside edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNames {
    pub attack: String,
    pub defend: String,
}

/// Resolved text for an entity: a main label and an optional secondary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityLabel {
    pub name: String,
    pub subtitle: String,
}

/// Map a structural entity id to its roster side and slot.
#[must_use]
pub fn slot_for(id: &str) -> Option<(Side, usize)> {
    let slot = match id {
        "P1" => (Side::Attack, 0),
        "P2" => (Side::Attack, 1),
        "P3" => (Side::Attack, 2),
        "P4" => (Side::Attack, 3),
        "GK_A" => (Side::Attack, 4),
        "D1" => (Side::Defend, 0),
        "D2" => (Side::Defend, 1),
        "D3" => (Side::Defend, 2),
        "D4" => (Side::Defend, 3),
        "GK_D" => (Side::Defend, 4),
        _ => return None,
    };
    Some(slot)
}

impl RosterBinding {
    /// The binding for a structural id, if that slot has been filled.
    #[must_use]
    pub fn binding_for(&self, id: &str) -> Option<&PlayerBinding> {
        let (side, slot) = slot_for(id)?;
        let list = match side {
            Side::Attack => &self.attack,
            Side::Defend => &self.defend,
        };
        list.get(slot)
            .filter(|b| !b.display_name.is_empty() && b.display_name != PLACEHOLDER_NAME)
    }

    /// Resolve the text drawn for `entity`.
    ///
    /// Balls carry no label and zones always read [`TARGET_LABEL`]. Players use
    /// their roster binding when one is filled in, otherwise `entity.label`.
    #[must_use]
    pub fn label_for(&self, entity: &Entity) -> EntityLabel {
        match entity.kind {
            EntityKind::Ball => EntityLabel { name: String::new(), subtitle: String::new() },
            EntityKind::TargetZone => EntityLabel { name: TARGET_LABEL.to_owned(), subtitle: String::new() },
            EntityKind::Attacker | EntityKind::Defender | EntityKind::Goalkeeper => match self.binding_for(&entity.id) {
                Some(b) => EntityLabel { name: b.display_name.clone(), subtitle: b.role_text.clone() },
                None => EntityLabel { name: entity.label.clone(), subtitle: String::new() },
            },
        }
    }
}

/// Which side's panel an entity is listed under.
///
/// Goalkeepers are split by their structural id. Ball and zones are `None`,
/// and so is a goalkeeper whose id carries no side marker; object listings
/// must skip players so such a keeper is listed nowhere.
#[must_use]
pub fn side_of(entity: &Entity) -> Option<Side> {
    match entity.kind {
        EntityKind::Attacker => Some(Side::Attack),
        EntityKind::Defender => Some(Side::Defend),
        EntityKind::Goalkeeper if entity.id.contains("GK_A") => Some(Side::Attack),
        EntityKind::Goalkeeper if entity.id.contains("GK_D") => Some(Side::Defend),
        EntityKind::Goalkeeper | EntityKind::Ball | EntityKind::TargetZone => None,
    }
}
