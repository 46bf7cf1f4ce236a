use super::context::TickContext;
use crate::domain::ActorMovementSnapshot;
use crate::domain::ports::ActorBase;

/// Distills the locomotion controller's current state into `snapshot`.
///
/// Authoritative side only. Returns `true` when the ALIVE aspect must be marked dirty,
/// which is exactly when the actor is alive; a dead actor is not extracted at all and its
/// last snapshot stays latched.
pub fn extract_movement(
    ctx: &TickContext<'_>,
    base: &dyn ActorBase,
    snapshot: &mut ActorMovementSnapshot,
) -> bool {
    if base.health() <= 0.0 {
        return false;
    }

    let state = ctx.locomotion.movement_state();

    // One step ahead of the actor, not a long-term waypoint.
    snapshot.move_target = base.world_position() + state.movement_direction;
    snapshot.aim_target = state.eye_position + state.aim_direction;
    snapshot.look_target = state.eye_position + state.eye_direction;
    snapshot.fire_target = state.fire_target;

    // From the actor's own outgoing request, which may lag the controller by a step.
    let speed = base.movement_request_velocity().length();
    snapshot.desired_speed = if speed.is_finite() { speed } else { 0.0 };

    snapshot.stance = i32::from(state.stance);
    snapshot.has_aim_target = state.is_aiming;

    true
}
