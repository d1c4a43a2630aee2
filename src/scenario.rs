//! Scenario model: entities, steps, and the collaborator's scenario value.
//!
//! A [`Scenario`] arrives from the host as JSON. Each [`Step`] is a full
//! snapshot of every [`Entity`] on the pitch, not a diff; the same entity id
//! recurs in every step to represent one token over time.
//!
//! `attached_to` is a non-owning pointer to another entity in the same step,
//! stored by id and resolved by lookup whenever it is needed. A lookup miss
//! is a no-op, never an error.

#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;

use serde::{Deserialize, Serialize};

use crate::viewport::Point;

/// Stable identity of an entity across steps.
pub type EntityId = String;

/// Identity of a step within its scenario.
pub type StepId = u32;

/// What an entity represents on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Attacker,
    Defender,
    #[serde(alias = "gk")]
    Goalkeeper,
    Ball,
    /// Circular area of interest sized by `Entity::radius`.
    #[serde(alias = "target")]
    TargetZone,
}

impl EntityKind {
    /// Whether this kind is drawn as a labelled player token.
    #[must_use]
    pub fn is_player(self) -> bool {
        matches!(self, Self::Attacker | Self::Defender | Self::Goalkeeper)
    }
}

/// A single token on the pitch at one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    #[serde(rename = "type", alias = "kind")]
    pub kind: EntityKind,
    /// Display text used when no roster binding applies.
    #[serde(default)]
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Id of another entity in the same step that this one follows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_to: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Entity {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move by a world-space delta.
    pub fn translate(&mut self, delta: Point) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// One waypoint in the choreography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: StepId,
    pub title: String,
    /// Time to animate into this step from the previous one. Unused for step 0.
    #[serde(rename = "transitionDurationMs", alias = "duration", default)]
    pub duration_ms: f64,
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Step {
    /// Look up an entity in this step by id.
    #[must_use]
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }
}

/// The host's unit of work. The engine reads it but never writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: u32,
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default, alias = "tacticalAnalysis")]
    pub tactical_notes: Vec<String>,
    pub steps: Vec<Step>,
}

/// Cheap structural identity used to decide whether an incoming scenario
/// should replace the engine's local copy.
///
/// Two step lists with the same length and the same first-step id are
/// treated as the same structure, so re-supplying an edited copy of the
/// current scenario does not clobber in-progress edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub step_count: usize,
    pub first_step_id: Option<StepId>,
}

impl Fingerprint {
    #[must_use]
    pub fn of(steps: &[Step]) -> Self {
        Self { step_count: steps.len(), first_step_id: steps.first().map(|s| s.id) }
    }
}
