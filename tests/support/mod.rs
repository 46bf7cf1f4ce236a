// Shared fixtures for the replication integration tests.
#![allow(dead_code)]

use alien_sync::domain::{Aspect, Role, TickInfo};
use alien_sync::frameworks::host::{SimHostMode, SimSlot};
use alien_sync::frameworks::world::WorldSettings;
use alien_sync::interface_adapters::protocol::{encode_packet, write_aspect};
use glam::Vec3;
use std::time::Duration;

pub fn tick(role: Role, tick: u64) -> TickInfo {
    TickInfo {
        role,
        tick,
        frame_time: 1.0 / 30.0,
    }
}

// Server-side alien at `position` moving along `direction`.
pub fn server_slot(position: Vec3, direction: Vec3) -> SimSlot {
    let mut slot = SimSlot::new(1, position);
    slot.host.locomotion.state.movement_direction = direction;
    slot
}

// Runs one authoritative tick and returns every dirty aspect as packet JSON.
pub fn server_tick(slot: &mut SimSlot, mode: &SimHostMode, n: u64) -> Vec<(Aspect, String)> {
    slot.tick(tick(Role::DedicatedServer, n), mode);
    drain(slot, n)
}

pub fn drain(slot: &mut SimSlot, n: u64) -> Vec<(Aspect, String)> {
    slot.alien
        .take_dirty()
        .aspects()
        .map(|aspect| {
            let packet = write_aspect(&mut slot.alien, &mut slot.actor, slot.entity_id, n, aspect)
                .expect("aspect should encode")
                .expect("sim actors never veto");
            (aspect, encode_packet(&packet).expect("packet should frame"))
        })
        .collect()
}

// Fast deterministic settings for loopback runs.
pub fn quick_settings(run_ticks: u64) -> WorldSettings {
    WorldSettings {
        server_role: Role::DedicatedServer,
        actor_count: 3,
        tick_interval: Duration::from_millis(1),
        run_ticks,
        hide_toggle_interval: 10,
        death_tick: 20,
    }
}
