#![allow(clippy::float_cmp)]

use super::*;
use crate::scenario::Entity;

fn entity(id: &str, kind: EntityKind, x: f64, y: f64) -> Entity {
    Entity { id: id.into(), kind, label: id.into(), x, y, attached_to: None, radius: None }
}

fn follower(id: &str, leader: &str, x: f64, y: f64) -> Entity {
    Entity { attached_to: Some(leader.into()), ..entity(id, EntityKind::Defender, x, y) }
}

fn steps(n: u32) -> Vec<Step> {
    (0..n)
        .map(|i| {
            let offset = f64::from(i) * 10.0;
            Step {
                id: i + 1,
                title: format!("Step {}", i + 1),
                duration_ms: 1000.0,
                entities: vec![
                    entity("P2", EntityKind::Attacker, 100.0 + offset, 100.0),
                    follower("D2", "P2", 110.0 + offset, 105.0),
                    entity("ball", EntityKind::Ball, 200.0, 150.0),
                ],
                notes: None,
            }
        })
        .collect()
}

// =============================================================
// propagate_drag
// =============================================================

#[test]
fn drag_moves_active_and_later_steps_only() {
    let original = steps(5);
    let mut edited = original.clone();
    let k = 2;

    propagate_drag(&mut edited, k, "P2", Point::new(7.0, -3.0));

    for i in 0..k {
        assert_eq!(edited[i], original[i], "step {i} should be untouched");
    }
    for i in k..5 {
        let before = original[i].entity("P2").unwrap();
        let after = edited[i].entity("P2").unwrap();
        assert_eq!(after.x, before.x + 7.0);
        assert_eq!(after.y, before.y - 3.0);
    }
}

#[test]
fn drag_moves_attached_followers() {
    let original = steps(3);
    let mut edited = original.clone();

    propagate_drag(&mut edited, 1, "P2", Point::new(4.0, 4.0));

    assert_eq!(edited[0].entity("D2"), original[0].entity("D2"));
    for i in 1..3 {
        let before = original[i].entity("D2").unwrap();
        let after = edited[i].entity("D2").unwrap();
        assert_eq!(after.x, before.x + 4.0);
        assert_eq!(after.y, before.y + 4.0);
    }
}

#[test]
fn drag_follower_only_applies_where_attachment_persists() {
    let mut list = steps(3);
    list[2].entities[1].attached_to = None;
    let d2_last = list[2].entity("D2").unwrap().position();

    propagate_drag(&mut list, 0, "P2", Point::new(1.0, 1.0));

    assert_eq!(list[2].entity("D2").unwrap().position(), d2_last);
    assert_eq!(list[1].entity("D2").unwrap().x, 121.0);
}

#[test]
fn drag_leaves_unrelated_entities() {
    let mut list = steps(2);
    propagate_drag(&mut list, 0, "P2", Point::new(50.0, 50.0));
    assert_eq!(list[0].entity("ball").unwrap().position(), Point::new(200.0, 150.0));
    assert_eq!(list[1].entity("ball").unwrap().position(), Point::new(200.0, 150.0));
}

#[test]
fn drag_follower_does_not_move_leader() {
    let mut list = steps(2);
    propagate_drag(&mut list, 0, "D2", Point::new(5.0, 0.0));
    assert_eq!(list[0].entity("P2").unwrap().x, 100.0);
    assert_eq!(list[0].entity("D2").unwrap().x, 115.0);
}

#[test]
fn drag_reports_moved_count() {
    let mut list = steps(4);
    assert_eq!(propagate_drag(&mut list, 1, "P2", Point::new(1.0, 0.0)), 6);
}

#[test]
fn drag_unknown_id_is_noop() {
    let original = steps(2);
    let mut list = original.clone();
    assert_eq!(propagate_drag(&mut list, 0, "nobody", Point::new(9.0, 9.0)), 0);
    assert_eq!(list, original);
}

#[test]
fn drag_from_past_end_is_noop() {
    let original = steps(2);
    let mut list = original.clone();
    assert_eq!(propagate_drag(&mut list, 5, "P2", Point::new(9.0, 9.0)), 0);
    assert_eq!(list, original);
}

// =============================================================
// resize_zone
// =============================================================

fn zone_step(radius: Option<f64>) -> Step {
    let zone = Entity { radius, ..entity("T1", EntityKind::TargetZone, 200.0, 60.0) };
    Step { id: 1, title: "Zone".into(), duration_ms: 0.0, entities: vec![zone], notes: None }
}

#[test]
fn resize_adds_delta() {
    let mut step = zone_step(Some(30.0));
    assert_eq!(resize_zone(&mut step, "T1", 5.0, 20.0, 10.0), Some(35.0));
    assert_eq!(step.entity("T1").unwrap().radius, Some(35.0));
}

#[test]
fn resize_missing_radius_starts_from_default() {
    let mut step = zone_step(None);
    assert_eq!(resize_zone(&mut step, "T1", -5.0, 20.0, 10.0), Some(15.0));
}

#[test]
fn resize_clamps_to_minimum() {
    let mut step = zone_step(Some(12.0));
    assert_eq!(resize_zone(&mut step, "T1", -50.0, 20.0, 10.0), Some(10.0));
}

#[test]
fn resize_ignores_non_zones() {
    let mut step = zone_step(None);
    step.entities.push(entity("P1", EntityKind::Attacker, 0.0, 0.0));
    assert_eq!(resize_zone(&mut step, "P1", 5.0, 20.0, 10.0), None);
    assert!(step.entity("P1").unwrap().radius.is_none());
    assert_eq!(resize_zone(&mut step, "missing", 5.0, 20.0, 10.0), None);
}
