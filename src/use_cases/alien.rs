// Replicated alien behavior composed over an injected base actor.

use super::context::TickContext;
use super::extract::extract_movement;
use super::reconstruct::reconstruct_movement;
use super::scope::DedicatedServerScope;
use super::visibility::Visibility;
use crate::domain::ports::{ActorBase, NetStream};
use crate::domain::{
    ActorMovementSnapshot, ActorStats, AiActivation, Aspect, CodecError, DirtyAspects,
    EntityEvent,
};
use crate::interface_adapters::codec;
use tracing::{debug, trace};

/// Snapshot, visibility and dirty-aspect state for one AI-controlled alien.
///
/// Authoritative instances overwrite the snapshot from locomotion every tick; proxies
/// only ever write it from decoded ALIVE records.
#[derive(Debug, Default)]
pub struct Alien {
    snapshot: ActorMovementSnapshot,
    visibility: Visibility,
    stats: ActorStats,
    dirty: DirtyAspects,
}

impl Alien {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &ActorMovementSnapshot {
        &self.snapshot
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    pub fn dirty(&self) -> DirtyAspects {
        self.dirty
    }

    pub fn mark_dirty(&mut self, aspect: Aspect) {
        self.dirty |= DirtyAspects::from(aspect);
    }

    /// Hands the pending aspects to the replication layer and clears them.
    pub fn take_dirty(&mut self) -> DirtyAspects {
        std::mem::take(&mut self.dirty)
    }

    /// Aliens keep their AI running regardless of player proximity.
    pub fn post_init(&mut self, base: &mut dyn ActorBase) {
        base.set_ai_activation(AiActivation::Always);
    }

    pub fn update(&mut self, ctx: &mut TickContext<'_>, base: &mut dyn ActorBase) {
        base.update(ctx.info);

        if ctx.role().is_authoritative() {
            if extract_movement(ctx, base, &mut self.snapshot) {
                self.mark_dirty(Aspect::Alive);
            }
        } else {
            reconstruct_movement(ctx, base, &self.snapshot, &mut self.stats);
        }

        if ctx.role().is_dedicated_server() {
            if let Some(graph) = ctx.animation.as_deref_mut() {
                let _scope = DedicatedServerScope::enter(ctx.host_mode);
                graph.update();
            }
        }
    }

    pub fn process_event(
        &mut self,
        ctx: &mut TickContext<'_>,
        base: &mut dyn ActorBase,
        event: EntityEvent,
    ) {
        base.process_event(event);

        let changed = match event {
            EntityEvent::Hide => self.visibility.on_hide(ctx),
            EntityEvent::Unhide => self.visibility.on_unhide(ctx),
            EntityEvent::Timer(_) => false,
        };
        if changed {
            self.mark_dirty(Aspect::Hide);
        }
    }

    /// Serializes `aspect` in whichever direction `stream` runs.
    ///
    /// Returns `Ok(false)` when the base actor vetoed the aspect. A rejected ALIVE record
    /// leaves the snapshot untouched; a HIDE record is applied to the host entity as soon
    /// as it is read.
    pub fn net_serialize(
        &mut self,
        base: &mut dyn ActorBase,
        stream: &mut dyn NetStream,
        aspect: Aspect,
    ) -> Result<bool, CodecError> {
        if !base.net_serialize(stream, aspect)? {
            return Ok(false);
        }

        let reading = stream.is_reading();
        match aspect {
            Aspect::Alive => {
                let mut scratch = self.snapshot;
                codec::serialize_alive(stream, &mut scratch)?;
                if reading {
                    self.snapshot = scratch;
                    trace!(
                        stance = scratch.stance,
                        speed = scratch.desired_speed,
                        "alive aspect read"
                    );
                }
            }
            Aspect::Hide => {
                let mut hidden = self.visibility.is_hidden();
                codec::serialize_hide(stream, &mut hidden)?;
                if reading {
                    self.visibility.apply_remote(hidden);
                    base.hide(hidden);
                    debug!(hidden, "hide aspect applied");
                }
            }
        }

        Ok(true)
    }
}
