// Diagnostic dump of an alien's replicated state, one label per overlay row.

use crate::domain::{ActorMovementSnapshot, ActorStats, Role};
use glam::Vec3;
use serde_json::{Value, json};

fn vec_label(name: &str, v: Vec3) -> String {
    format!("{name} x{:.6} y{:.6} z{:.6}", v.x, v.y, v.z)
}

pub fn labels(
    role: Role,
    snapshot: &ActorMovementSnapshot,
    stats: &ActorStats,
    movement_input: Vec3,
) -> Vec<String> {
    vec![
        role.label().to_string(),
        vec_label("MoveTarget", snapshot.move_target),
        vec_label("AimTarget", snapshot.aim_target),
        vec_label("LookTarget", snapshot.look_target),
        vec_label("FireTarget", snapshot.fire_target),
        format!("DesiredSpeed {:.6}", snapshot.desired_speed),
        format!("Stance {}", snapshot.stance),
        format!("HasAimTarget {}", i32::from(snapshot.has_aim_target)),
        vec_label("m_input.movementVector", movement_input),
        format!("m_stats.speed {:.6}", stats.speed),
    ]
}

pub fn dump_json(
    role: Role,
    snapshot: &ActorMovementSnapshot,
    stats: &ActorStats,
    movement_input: Vec3,
) -> Value {
    json!({
        "role": role.label(),
        "move_target": snapshot.move_target.to_array(),
        "aim_target": snapshot.aim_target.to_array(),
        "look_target": snapshot.look_target.to_array(),
        "fire_target": snapshot.fire_target.to_array(),
        "desired_speed": snapshot.desired_speed,
        "stance": snapshot.stance,
        "has_aim_target": snapshot.has_aim_target,
        "movement_input": movement_input.to_array(),
        "speed": stats.speed,
    })
}
