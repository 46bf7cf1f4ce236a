use super::context::TickContext;
use crate::domain::ports::ActorBase;
use crate::domain::{ActorMovementSnapshot, ActorStats, MovementRequest, Stance};
use glam::Vec3;

/// Builds the movement request a non-authoritative proxy submits for `snapshot`.
///
/// The replicated move target is an offset and is re-anchored to the proxy's current
/// position, so under position desync the absolute target differs from the one the
/// authoritative actor extracted.
pub fn build_movement_request(
    base: &dyn ActorBase,
    snapshot: &ActorMovementSnapshot,
) -> MovementRequest {
    let mut request = MovementRequest::default();
    request.set_move_target(base.position() + snapshot.move_target);
    request.set_look_target(snapshot.look_target);
    // Local forward; body facing is not replicated.
    request.set_body_target(base.world_rotation() * Vec3::Y);
    request.set_fire_target(snapshot.fire_target);
    request.set_desired_speed(snapshot.desired_speed);

    // Decode already rejected stances outside the enumeration.
    if let Ok(stance) = Stance::try_from(snapshot.stance) {
        request.set_stance(stance);
    }

    // Aim targets are replicated but never applied on proxies.
    request.clear_aim_target();

    request
}

/// Submits the reconstructed request and keeps the locally observed stats in step.
pub fn reconstruct_movement(
    ctx: &mut TickContext<'_>,
    base: &dyn ActorBase,
    snapshot: &ActorMovementSnapshot,
    stats: &mut ActorStats,
) {
    let request = build_movement_request(base, snapshot);

    stats.speed = snapshot.desired_speed;
    stats.fire_dir = Vec3::ZERO;

    ctx.locomotion.request_movement(request);
}
