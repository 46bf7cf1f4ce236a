// Loopback host slots built on the in-memory collaborators.

use crate::domain::ports::{ActorBase, HostMode};
use crate::domain::{EntityEvent, Role, TickInfo};
use crate::interface_adapters::debug;
use crate::use_cases::Alien;
use glam::Vec3;

pub use crate::use_cases::test_support::{
    SimActor, SimAi, SimAnimationGraph, SimCollaborators, SimHostMode, SimInventory,
    SimLocomotion, SimTimers,
};

/// One replicated alien together with its host entity and collaborators.
#[derive(Debug)]
pub struct SimSlot {
    pub entity_id: u64,
    pub alien: Alien,
    pub actor: SimActor,
    pub host: SimCollaborators,
}

impl SimSlot {
    pub fn new(entity_id: u64, position: Vec3) -> Self {
        let mut actor = SimActor::at(position);
        let mut alien = Alien::new();
        alien.post_init(&mut actor);
        Self {
            entity_id,
            alien,
            actor,
            host: SimCollaborators::default(),
        }
    }

    pub fn tick(&mut self, info: TickInfo, mode: &dyn HostMode) {
        let mut ctx = self.host.context(info, mode);
        self.alien.update(&mut ctx, &mut self.actor);
    }

    pub fn notify(&mut self, info: TickInfo, mode: &dyn HostMode, event: EntityEvent) {
        let mut ctx = self.host.context(info, mode);
        self.alien.process_event(&mut ctx, &mut self.actor, event);
    }

    pub fn debug_labels(&self, role: Role) -> Vec<String> {
        debug::labels(
            role,
            self.alien.snapshot(),
            self.alien.stats(),
            self.actor.movement_input(),
        )
    }

    pub fn debug_dump(&self, role: Role) -> serde_json::Value {
        debug::dump_json(
            role,
            self.alien.snapshot(),
            self.alien.stats(),
            self.actor.movement_input(),
        )
    }
}
