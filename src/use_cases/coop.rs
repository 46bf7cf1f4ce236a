// Per-tick coop orchestration around the host AI system.

use crate::domain::Role;
use crate::domain::ports::{ActorBase, AiSystem};
use tracing::info;

#[derive(Debug, Default)]
pub struct CoopSystem {
    forced_total: u64,
}

impl CoopSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actors that received an AI override since startup.
    pub fn forced_total(&self) -> u64 {
        self.forced_total
    }

    /// AI only runs where the simulation is authoritative. On that side, actors that were
    /// spawned without an AI proxy get the `force_ai_override` capability invoked.
    /// Returns how many actors were overridden this tick.
    pub fn update<'a, A>(
        &mut self,
        role: Role,
        ai: &mut dyn AiSystem,
        actors: impl IntoIterator<Item = &'a mut A>,
    ) -> usize
    where
        A: ActorBase + 'a,
    {
        ai.set_enabled(role.is_authoritative());
        if !role.is_authoritative() {
            return 0;
        }

        let mut forced = 0;
        for actor in actors {
            if !actor.has_ai() && actor.force_ai_override() {
                forced += 1;
            }
        }

        if forced > 0 {
            self.forced_total += forced as u64;
            info!(forced, "forced AI onto actors without a proxy");
        }
        forced
    }
}
