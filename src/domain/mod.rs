// Domain layer: replication state, ports and errors.

pub mod errors;
pub mod ports;
pub mod state;

pub use errors::CodecError;
pub use state::{
    ActorMovementSnapshot, ActorStats, AiActivation, Aspect, DirtyAspects, EntityEvent,
    MovementRequest, MovementState, Role, Stance, TickInfo, TimerId, WEAPON_REARM_DELAY,
};
