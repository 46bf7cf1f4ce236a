use glam::{Quat, Vec3};
use std::time::Duration;

use crate::domain::errors::CodecError;
use crate::domain::state::{
    AiActivation, Aspect, EntityEvent, MovementRequest, MovementState, TickInfo, TimerId,
};

// Port for the lower-level locomotion system that drives the alien's body.
pub trait LocomotionController {
    fn movement_state(&self) -> MovementState;
    fn request_movement(&mut self, request: MovementRequest);
}

// Port for the actor's inventory.
pub trait Inventory {
    fn clear(&mut self);
    fn item_count(&self) -> usize;
}

// Port for the host timer service. Scheduled timers are fire-and-forget.
pub trait TimerService {
    fn set_timer(&mut self, timer: TimerId, delay: Duration);
}

// Port for the actor's animation graph.
pub trait AnimationGraphState {
    fn update(&mut self);
}

// Port for the engine's dedicated-server compatibility mode.
// Callers go through `DedicatedServerScope` rather than calling these directly.
pub trait HostMode {
    fn enter_dedicated_server(&self);
    fn exit_dedicated_server(&self);
}

// Port for the host AI system.
pub trait AiSystem {
    fn set_enabled(&mut self, enabled: bool);
}

/// Symmetric field stream: the same call sequence writes on the sending side and
/// reads on the receiving side. Readers overwrite the referenced values.
pub trait NetStream {
    fn is_reading(&self) -> bool;

    /// World-space point with the quantized world compression profile.
    fn world_vec3(&mut self, name: &'static str, value: &mut Vec3) -> Result<(), CodecError>;

    /// Full-precision scalar.
    fn value_f32(&mut self, name: &'static str, value: &mut f32) -> Result<(), CodecError>;

    /// Integer carried in a signed 8-bit field.
    fn value_i8(&mut self, name: &'static str, value: &mut i32) -> Result<(), CodecError>;

    fn value_bool(&mut self, name: &'static str, value: &mut bool) -> Result<(), CodecError>;
}

/// Generic actor behavior the alien composes with instead of inheriting from.
pub trait ActorBase {
    fn update(&mut self, _tick: TickInfo) {}

    fn process_event(&mut self, _event: EntityEvent) {}

    /// Base actor aspects. Returning `false` vetoes the alien's own fields.
    fn net_serialize(
        &mut self,
        _stream: &mut dyn NetStream,
        _aspect: Aspect,
    ) -> Result<bool, CodecError> {
        Ok(true)
    }

    fn world_position(&self) -> Vec3;

    /// Position in the parent frame; equals the world position for unparented actors.
    fn position(&self) -> Vec3;

    fn world_rotation(&self) -> Quat;

    fn health(&self) -> f32;

    /// Velocity of the movement request this actor last issued itself.
    fn movement_request_velocity(&self) -> Vec3;

    /// Raw movement input, shown in the debug overlay.
    fn movement_input(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Applies visual/simulation hiding on the host entity.
    fn hide(&mut self, hidden: bool);

    fn set_ai_activation(&mut self, _mode: AiActivation) {}

    fn has_ai(&self) -> bool {
        true
    }

    /// Optional capability: attach an AI proxy to an actor that was spawned without one.
    /// Returns whether an override was applied.
    fn force_ai_override(&mut self) -> bool {
        false
    }
}
