use crate::domain::ports::{
    AnimationGraphState, HostMode, Inventory, LocomotionController, TimerService,
};
use crate::domain::{Role, TickInfo};

/// Everything a core operation may touch during one actor's tick.
///
/// Built by the host per actor per tick and passed explicitly; nothing in the core
/// reads process-wide flags.
pub struct TickContext<'a> {
    pub info: TickInfo,
    pub locomotion: &'a mut dyn LocomotionController,
    pub inventory: &'a mut dyn Inventory,
    pub timers: &'a mut dyn TimerService,
    pub animation: Option<&'a mut dyn AnimationGraphState>,
    pub host_mode: &'a dyn HostMode,
}

impl TickContext<'_> {
    pub fn role(&self) -> Role {
        self.info.role
    }
}
