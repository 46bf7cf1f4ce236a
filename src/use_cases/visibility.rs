use super::context::TickContext;
use crate::domain::{TimerId, WEAPON_REARM_DELAY};
use tracing::debug;

/// Visible/Hidden state machine for an alien.
///
/// Transitions are edge-triggered: a notification that does not change the state is
/// ignored, so each transition runs its side effect once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_hidden(self) -> bool {
        matches!(self, Visibility::Hidden)
    }

    /// Visible -> Hidden. Empties the inventory; items are gone for good.
    /// Returns whether the HIDE aspect changed (authoritative side only).
    pub fn on_hide(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if !ctx.role().is_authoritative() || self.is_hidden() {
            return false;
        }

        let dropped = ctx.inventory.item_count();
        ctx.inventory.clear();
        *self = Visibility::Hidden;
        debug!(tick = ctx.info.tick, dropped, "alien hidden");
        true
    }

    /// Hidden -> Visible. Weapons come back after `WEAPON_REARM_DELAY`.
    /// Returns whether the HIDE aspect changed (authoritative side only).
    pub fn on_unhide(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if !ctx.role().is_authoritative() || !self.is_hidden() {
            return false;
        }

        ctx.timers.set_timer(TimerId::WeaponDelay, WEAPON_REARM_DELAY);
        *self = Visibility::Visible;
        debug!(tick = ctx.info.tick, "alien unhidden");
        true
    }

    /// Proxies only learn about transitions from decoded HIDE records.
    pub fn apply_remote(&mut self, hidden: bool) {
        *self = if hidden {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
    }
}
