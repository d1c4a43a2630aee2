use serde_json::json;

use super::*;

fn entity(id: &str, kind: EntityKind) -> Entity {
    Entity { id: id.into(), kind, label: format!("#{id}"), x: 0.0, y: 0.0, attached_to: None, radius: None }
}

fn binding(name: &str, role: &str) -> PlayerBinding {
    PlayerBinding { display_name: name.into(), role_text: role.into() }
}

fn roster() -> RosterBinding {
    RosterBinding {
        attack: vec![
            binding("Anh", "Pivot"),
            binding("Binh", "Left wing"),
            binding(PLACEHOLDER_NAME, "Right wing"),
            binding("", "Fixo"),
            binding("Khoa", "Keeper"),
        ],
        defend: vec![binding("Minh", "Marker")],
    }
}

// =============================================================
// slot_for
// =============================================================

#[test]
fn slot_for_maps_structural_ids() {
    assert_eq!(slot_for("P1"), Some((Side::Attack, 0)));
    assert_eq!(slot_for("P4"), Some((Side::Attack, 3)));
    assert_eq!(slot_for("GK_A"), Some((Side::Attack, 4)));
    assert_eq!(slot_for("D3"), Some((Side::Defend, 2)));
    assert_eq!(slot_for("GK_D"), Some((Side::Defend, 4)));
}

#[test]
fn slot_for_unknown_id() {
    assert_eq!(slot_for("P5"), None);
    assert_eq!(slot_for("ball"), None);
}

// =============================================================
// label_for
// =============================================================

#[test]
fn bound_player_uses_roster_name_and_role() {
    let label = roster().label_for(&entity("P2", EntityKind::Attacker));
    assert_eq!(label.name, "Binh");
    assert_eq!(label.subtitle, "Left wing");
}

#[test]
fn goalkeeper_uses_fifth_slot() {
    let label = roster().label_for(&entity("GK_A", EntityKind::Goalkeeper));
    assert_eq!(label.name, "Khoa");
}

#[test]
fn placeholder_name_falls_back_to_entity_label() {
    let label = roster().label_for(&entity("P3", EntityKind::Attacker));
    assert_eq!(label.name, "#P3");
    assert_eq!(label.subtitle, "");
}

#[test]
fn empty_name_falls_back_to_entity_label() {
    let label = roster().label_for(&entity("P4", EntityKind::Attacker));
    assert_eq!(label.name, "#P4");
}

#[test]
fn missing_slot_falls_back_to_entity_label() {
    let label = roster().label_for(&entity("D4", EntityKind::Defender));
    assert_eq!(label.name, "#D4");
}

#[test]
fn unstructured_id_uses_entity_label() {
    let label = roster().label_for(&entity("winger", EntityKind::Attacker));
    assert_eq!(label.name, "#winger");
}

#[test]
fn ball_has_no_label() {
    let label = roster().label_for(&entity("ball", EntityKind::Ball));
    assert!(label.name.is_empty());
    assert!(label.subtitle.is_empty());
}

#[test]
fn zone_reads_target() {
    let label = RosterBinding::default().label_for(&entity("T1", EntityKind::TargetZone));
    assert_eq!(label.name, TARGET_LABEL);
}

#[test]
fn roster_accepts_host_field_names() {
    let roster: RosterBinding = serde_json::from_value(json!({
        "attack": [{ "name": "Anh", "instruction": "Pivot" }],
        "defend": []
    }))
    .unwrap();
    assert_eq!(roster.attack[0], binding("Anh", "Pivot"));
}

// =============================================================
// side_of
// =============================================================

#[test]
fn side_of_splits_goalkeepers_by_id() {
    assert_eq!(side_of(&entity("GK_A", EntityKind::Goalkeeper)), Some(Side::Attack));
    assert_eq!(side_of(&entity("GK_D", EntityKind::Goalkeeper)), Some(Side::Defend));
    assert_eq!(side_of(&entity("keeper", EntityKind::Goalkeeper)), None);
}

#[test]
fn side_of_objects_is_none() {
    assert_eq!(side_of(&entity("ball", EntityKind::Ball)), None);
    assert_eq!(side_of(&entity("T1", EntityKind::TargetZone)), None);
    assert_eq!(side_of(&entity("P1", EntityKind::Attacker)), Some(Side::Attack));
}
