#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn entity(id: &str, kind: EntityKind, x: f64, y: f64) -> Entity {
    Entity { id: id.into(), kind, label: id.into(), x, y, attached_to: None, radius: None }
}

fn step(id: StepId, entities: Vec<Entity>) -> Step {
    Step { id, title: format!("Step {id}"), duration_ms: 1000.0, entities, notes: None }
}

// =============================================================
// EntityKind
// =============================================================

#[test]
fn kind_accepts_short_wire_names() {
    let gk: EntityKind = serde_json::from_value(json!("gk")).unwrap();
    let zone: EntityKind = serde_json::from_value(json!("target")).unwrap();
    assert_eq!(gk, EntityKind::Goalkeeper);
    assert_eq!(zone, EntityKind::TargetZone);
}

#[test]
fn kind_serializes_kebab_case() {
    assert_eq!(serde_json::to_value(EntityKind::TargetZone).unwrap(), json!("target-zone"));
    assert_eq!(serde_json::to_value(EntityKind::Goalkeeper).unwrap(), json!("goalkeeper"));
}

#[test]
fn kind_is_player() {
    assert!(EntityKind::Attacker.is_player());
    assert!(EntityKind::Defender.is_player());
    assert!(EntityKind::Goalkeeper.is_player());
    assert!(!EntityKind::Ball.is_player());
    assert!(!EntityKind::TargetZone.is_player());
}

// =============================================================
// Entity / Step
// =============================================================

#[test]
fn entity_deserializes_attachment_and_radius() {
    let e: Entity = serde_json::from_value(json!({
        "id": "D2", "type": "defender", "label": "D2", "x": 120.0, "y": 80.0, "attachedTo": "P2"
    }))
    .unwrap();
    assert_eq!(e.kind, EntityKind::Defender);
    assert_eq!(e.attached_to.as_deref(), Some("P2"));
    assert!(e.radius.is_none());
}

#[test]
fn entity_translate_moves_position() {
    let mut e = entity("P1", EntityKind::Attacker, 10.0, 20.0);
    e.translate(Point::new(5.0, -3.0));
    assert_eq!(e.position(), Point::new(15.0, 17.0));
}

#[test]
fn step_accepts_legacy_duration_key() {
    let s: Step = serde_json::from_value(json!({
        "id": 2, "title": "Overlap", "duration": 1500.0, "entities": []
    }))
    .unwrap();
    assert_eq!(s.duration_ms, 1500.0);
    assert!(s.notes.is_none());
}

#[test]
fn step_entity_lookup_hit_and_miss() {
    let mut s = step(1, vec![entity("P1", EntityKind::Attacker, 1.0, 2.0), entity("ball", EntityKind::Ball, 3.0, 4.0)]);
    assert_eq!(s.entity("ball").map(|e| e.x), Some(3.0));
    assert!(s.entity("P9").is_none());
    s.entity_mut("P1").unwrap().x = 50.0;
    assert_eq!(s.entity("P1").unwrap().x, 50.0);
}

#[test]
fn scenario_deserializes_legacy_field_names() {
    let sc: Scenario = serde_json::from_value(json!({
        "id": 7,
        "title": "Pressing trap",
        "desc": "Force play wide",
        "tacticalAnalysis": ["Cut the pivot", "Double on the wing"],
        "steps": [{ "id": 1, "title": "Start", "duration": 0, "entities": [] }]
    }))
    .unwrap();
    assert_eq!(sc.description, "Force play wide");
    assert_eq!(sc.tactical_notes.len(), 2);
    assert_eq!(sc.steps[0].title, "Start");
}

#[test]
fn step_serializes_transition_key() {
    let v = serde_json::to_value(step(1, vec![])).unwrap();
    assert_eq!(v["transitionDurationMs"], json!(1000.0));
    assert!(v.get("notes").is_none());
}

// =============================================================
// Fingerprint
// =============================================================

#[test]
fn fingerprint_ignores_positions() {
    let a = vec![step(1, vec![entity("P1", EntityKind::Attacker, 0.0, 0.0)]), step(2, vec![])];
    let mut b = a.clone();
    b[0].entities[0].x = 99.0;
    assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
}

#[test]
fn fingerprint_differs_on_step_count() {
    let a = vec![step(1, vec![])];
    let b = vec![step(1, vec![]), step(2, vec![])];
    assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
}

#[test]
fn fingerprint_differs_on_first_step_id() {
    assert_ne!(Fingerprint::of(&[step(1, vec![])]), Fingerprint::of(&[step(5, vec![])]));
}

#[test]
fn fingerprint_of_empty() {
    let fp = Fingerprint::of(&[]);
    assert_eq!(fp.step_count, 0);
    assert!(fp.first_step_id.is_none());
}
