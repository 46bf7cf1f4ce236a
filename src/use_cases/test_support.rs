// In-memory collaborators for use-case tests; the loopback host runs on them too.

use crate::domain::ports::{
    ActorBase, AiSystem, AnimationGraphState, HostMode, Inventory, LocomotionController,
    NetStream, TimerService,
};
use crate::domain::{
    AiActivation, Aspect, CodecError, EntityEvent, MovementRequest, MovementState, TickInfo,
    TimerId,
};
use crate::use_cases::TickContext;
use glam::{Quat, Vec3};
use std::cell::Cell;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct SimLocomotion {
    pub state: MovementState,
    pub last_request: Option<MovementRequest>,
    pub request_count: u64,
}

impl LocomotionController for SimLocomotion {
    fn movement_state(&self) -> MovementState {
        self.state
    }

    fn request_movement(&mut self, request: MovementRequest) {
        self.last_request = Some(request);
        self.request_count += 1;
    }
}

#[derive(Debug, Default)]
pub struct SimInventory {
    pub items: Vec<String>,
}

impl SimInventory {
    pub fn with_items(count: usize) -> Self {
        Self {
            items: (0..count).map(|i| format!("item-{i}")).collect(),
        }
    }
}

impl Inventory for SimInventory {
    fn clear(&mut self) {
        self.items.clear();
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Default)]
pub struct SimTimers {
    pub scheduled: Vec<(TimerId, Duration)>,
}

impl TimerService for SimTimers {
    fn set_timer(&mut self, timer: TimerId, delay: Duration) {
        self.scheduled.push((timer, delay));
    }
}

#[derive(Debug, Default)]
pub struct SimAnimationGraph {
    pub updates: u64,
}

impl AnimationGraphState for SimAnimationGraph {
    fn update(&mut self) {
        self.updates += 1;
    }
}

/// Tracks the dedicated-server compatibility mode like the engine's global flag pair.
#[derive(Debug, Default)]
pub struct SimHostMode {
    depth: Cell<u32>,
    entered: Cell<u64>,
}

impl SimHostMode {
    pub fn depth(&self) -> u32 {
        self.depth.get()
    }

    pub fn entered(&self) -> u64 {
        self.entered.get()
    }
}

impl HostMode for SimHostMode {
    fn enter_dedicated_server(&self) {
        self.depth.set(self.depth.get() + 1);
        self.entered.set(self.entered.get() + 1);
    }

    fn exit_dedicated_server(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[derive(Debug, Default)]
pub struct SimAi {
    pub enabled: bool,
}

impl AiSystem for SimAi {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Host entity standing in for the engine's generic actor.
#[derive(Debug)]
pub struct SimActor {
    pub position: Vec3,
    pub rotation: Quat,
    pub health: f32,
    pub hidden: bool,
    pub request_velocity: Vec3,
    pub input: Vec3,
    pub has_ai: bool,
    pub ai_activation: AiActivation,
    pub updates: u64,
    pub events: Vec<EntityEvent>,
    /// When set, the base serializer vetoes every aspect.
    pub veto_serialize: bool,
}

impl SimActor {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            health: 100.0,
            hidden: false,
            request_velocity: Vec3::ZERO,
            input: Vec3::ZERO,
            has_ai: true,
            ai_activation: AiActivation::default(),
            updates: 0,
            events: Vec::new(),
            veto_serialize: false,
        }
    }
}

impl ActorBase for SimActor {
    fn update(&mut self, _tick: TickInfo) {
        self.updates += 1;
    }

    fn process_event(&mut self, event: EntityEvent) {
        self.events.push(event);
    }

    fn net_serialize(
        &mut self,
        _stream: &mut dyn NetStream,
        _aspect: Aspect,
    ) -> Result<bool, CodecError> {
        Ok(!self.veto_serialize)
    }

    fn world_position(&self) -> Vec3 {
        self.position
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn world_rotation(&self) -> Quat {
        self.rotation
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn movement_request_velocity(&self) -> Vec3 {
        self.request_velocity
    }

    fn movement_input(&self) -> Vec3 {
        self.input
    }

    fn hide(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn set_ai_activation(&mut self, mode: AiActivation) {
        self.ai_activation = mode;
    }

    fn has_ai(&self) -> bool {
        self.has_ai
    }

    fn force_ai_override(&mut self) -> bool {
        if self.has_ai {
            return false;
        }
        self.has_ai = true;
        true
    }
}

/// Per-actor collaborators the tick context borrows from.
#[derive(Debug, Default)]
pub struct SimCollaborators {
    pub locomotion: SimLocomotion,
    pub inventory: SimInventory,
    pub timers: SimTimers,
    pub graph: SimAnimationGraph,
}

impl SimCollaborators {
    pub fn context<'a>(&'a mut self, info: TickInfo, mode: &'a dyn HostMode) -> TickContext<'a> {
        TickContext {
            info,
            locomotion: &mut self.locomotion,
            inventory: &mut self.inventory,
            timers: &mut self.timers,
            animation: Some(&mut self.graph),
            host_mode: mode,
        }
    }
}
