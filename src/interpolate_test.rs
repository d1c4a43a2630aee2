#![allow(clippy::float_cmp)]

use super::*;
use crate::scenario::EntityKind;

const EPSILON: f64 = 1e-9;

fn entity(id: &str, x: f64, y: f64) -> Entity {
    Entity { id: id.into(), kind: EntityKind::Attacker, label: id.into(), x, y, attached_to: None, radius: None }
}

fn step(entities: Vec<Entity>) -> Step {
    Step { id: 1, title: String::new(), duration_ms: 1000.0, entities, notes: None }
}

#[test]
fn linear_at_quarter_points() {
    let a = step(vec![entity("E", 10.0, 200.0)]);
    let b = step(vec![entity("E", 110.0, 100.0)]);
    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let out = interpolate(&a, &b, t);
        assert!((out[0].x - (10.0 + 100.0 * t)).abs() < EPSILON, "t={t}");
        assert!((out[0].y - (200.0 - 100.0 * t)).abs() < EPSILON, "t={t}");
    }
}

#[test]
fn missing_target_holds_start_position() {
    let a = step(vec![entity("E", 42.0, 17.0), entity("F", 0.0, 0.0)]);
    let b = step(vec![entity("F", 100.0, 100.0)]);
    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let out = interpolate(&a, &b, t);
        assert_eq!(out[0].x, 42.0);
        assert_eq!(out[0].y, 17.0);
    }
}

#[test]
fn matches_by_id_not_index() {
    let a = step(vec![entity("A", 0.0, 0.0), entity("B", 100.0, 0.0)]);
    let b = step(vec![entity("B", 200.0, 0.0), entity("A", 0.0, 100.0)]);
    let out = interpolate(&a, &b, 0.5);
    assert_eq!(out[0].id, "A");
    assert_eq!(out[0].y, 50.0);
    assert_eq!(out[1].id, "B");
    assert_eq!(out[1].x, 150.0);
}

#[test]
fn entities_only_in_target_are_not_drawn() {
    let a = step(vec![entity("A", 0.0, 0.0)]);
    let b = step(vec![entity("A", 10.0, 0.0), entity("NEW", 5.0, 5.0)]);
    assert_eq!(interpolate(&a, &b, 0.5).len(), 1);
}

#[test]
fn keeps_start_metadata() {
    let mut start = entity("D2", 0.0, 0.0);
    start.attached_to = Some("P2".into());
    let mut end = entity("D2", 10.0, 0.0);
    end.label = "changed".into();
    let out = interpolate(&step(vec![start]), &step(vec![end]), 0.5);
    assert_eq!(out[0].attached_to.as_deref(), Some("P2"));
    assert_eq!(out[0].label, "D2");
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(3.0, 9.0, 0.0), 3.0);
    assert_eq!(lerp(3.0, 9.0, 1.0), 9.0);
    assert_eq!(lerp(3.0, 9.0, 0.5), 6.0);
}
