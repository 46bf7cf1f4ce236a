// Authoritative and proxy world loops joined by a packet channel.

use crate::domain::{ActorMovementSnapshot, EntityEvent, MovementState, Role, Stance, TickInfo};
use crate::frameworks::host::{SimAi, SimHostMode, SimSlot};
use crate::interface_adapters::protocol::{
    apply_packet, decode_packet, encode_packet, write_aspect,
};
use crate::use_cases::CoopSystem;
use glam::Vec3;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc};
use tracing::{debug, info, warn};

/// Settings shared by both world loops.
#[derive(Debug, Clone, Copy)]
pub struct WorldSettings {
    /// Authoritative role the server loop runs under.
    pub server_role: Role,
    pub actor_count: usize,
    pub tick_interval: Duration,
    /// Ticks before the server stops (0 runs until shutdown).
    pub run_ticks: u64,
    /// Ticks between scripted hide/unhide notifications (0 disables them).
    pub hide_toggle_interval: u64,
    /// Tick at which the first alien dies (0 disables it).
    pub death_tick: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ServerReport {
    pub ticks: u64,
    pub packets_sent: u64,
    pub encode_errors: u64,
    pub forced_ai: u64,
    /// Authoritative snapshots at shutdown, by entity id.
    pub snapshots: BTreeMap<u64, ActorMovementSnapshot>,
    pub hidden: BTreeMap<u64, bool>,
}

/// What a proxy looked like when the client loop stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyState {
    pub snapshot: ActorMovementSnapshot,
    pub hidden: bool,
    pub speed: f32,
    pub requests: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ClientReport {
    pub ticks: u64,
    pub packets_applied: u64,
    pub packets_ignored: u64,
    pub decode_errors: u64,
    pub proxies: BTreeMap<u64, ProxyState>,
}

// Stand-in for the AI layer: circles each alien and cycles its posture.
fn drive_scripted_ai(slot: &mut SimSlot, index: usize, tick: u64, dt: f32) {
    let angle = tick as f32 * dt * 0.5 + index as f32;
    let direction = Vec3::new(angle.cos(), angle.sin(), 0.0);
    let speed = 2.0 + index as f32;
    let stance = [Stance::Stand, Stance::Crouch, Stance::Alerted][(tick / 60) as usize % 3];

    let position = slot.actor.position;
    slot.host.locomotion.state = MovementState {
        movement_direction: direction,
        eye_position: position + Vec3::new(0.0, 0.0, 1.8),
        aim_direction: direction * 10.0,
        eye_direction: direction,
        fire_target: position + direction * 20.0,
        stance,
        is_aiming: (tick / 30 + index as u64) % 2 == 0,
    };

    if slot.actor.health > 0.0 && !slot.actor.hidden {
        slot.actor.request_velocity = direction * speed;
        slot.actor.position += direction * speed * dt;
    } else {
        slot.actor.request_velocity = Vec3::ZERO;
    }
}

// Proxies walk toward their last submitted request at the requested speed.
fn follow_request(slot: &mut SimSlot, dt: f32) {
    let Some(request) = slot.host.locomotion.last_request else {
        return;
    };
    let (Some(target), Some(speed)) = (request.move_target, request.desired_speed) else {
        return;
    };
    let delta = target - slot.actor.position;
    let step = (speed * dt).min(delta.length());
    slot.actor.position += delta.normalize_or_zero() * step;
}

pub async fn server_world_task(
    settings: WorldSettings,
    packet_tx: mpsc::Sender<String>,
    shutdown: Arc<Notify>,
) -> ServerReport {
    let mode = SimHostMode::default();
    let mut ai = SimAi::default();
    let mut coop = CoopSystem::new();
    let mut slots: Vec<SimSlot> = (0..settings.actor_count)
        .map(|i| SimSlot::new(i as u64 + 1, Vec3::new(i as f32 * 4.0, 0.0, 0.0)))
        .collect();
    for (index, slot) in slots.iter_mut().enumerate() {
        slot.host.inventory.items = vec![format!("alien-weapon-{index}")];
    }
    // Late spawns can arrive without an AI proxy attached.
    if let Some(last) = slots.last_mut() {
        last.actor.has_ai = false;
    }

    let dt = settings.tick_interval.as_secs_f32();
    let mut interval = tokio::time::interval(settings.tick_interval);
    let mut report = ServerReport::default();

    'world: loop {
        tokio::select! {
            _ = shutdown.notified() => {
                break;
            }
            _ = interval.tick() => {}
        }

        report.ticks += 1;
        let tick = report.ticks;
        let info = TickInfo {
            role: settings.server_role,
            tick,
            frame_time: dt,
        };

        report.forced_ai += coop.update(
            settings.server_role,
            &mut ai,
            slots.iter_mut().map(|s| &mut s.actor),
        ) as u64;

        if settings.death_tick != 0 && tick == settings.death_tick {
            if let Some(first) = slots.first_mut() {
                first.actor.health = 0.0;
                info!(entity_id = first.entity_id, tick, "alien died");
            }
        }

        if settings.hide_toggle_interval != 0
            && tick % settings.hide_toggle_interval == 0
            && !slots.is_empty()
        {
            let index = (tick / settings.hide_toggle_interval) as usize % slots.len();
            let slot = &mut slots[index];
            let event = if slot.alien.is_hidden() {
                EntityEvent::Unhide
            } else {
                EntityEvent::Hide
            };
            slot.actor.hidden = event == EntityEvent::Hide;
            slot.notify(info, &mode, event);
        }

        for (index, slot) in slots.iter_mut().enumerate() {
            drive_scripted_ai(slot, index, tick, dt);
            slot.tick(info, &mode);
        }

        for slot in &mut slots {
            for aspect in slot.alien.take_dirty().aspects() {
                let encoded = write_aspect(
                    &mut slot.alien,
                    &mut slot.actor,
                    slot.entity_id,
                    tick,
                    aspect,
                )
                .and_then(|packet| packet.as_ref().map(encode_packet).transpose());

                match encoded {
                    Ok(Some(text)) => {
                        if packet_tx.send(text).await.is_err() {
                            warn!("client channel closed; server world exiting");
                            break 'world;
                        }
                        report.packets_sent += 1;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        report.encode_errors += 1;
                        warn!(entity_id = slot.entity_id, ?aspect, error = %e, "failed to encode aspect");
                    }
                }
            }
        }

        if settings.run_ticks != 0 && tick >= settings.run_ticks {
            break;
        }
    }

    for slot in &slots {
        let labels = slot.debug_labels(settings.server_role).join(" | ");
        debug!(entity_id = slot.entity_id, %labels, "final alien state");
    }
    report.snapshots = slots
        .iter()
        .map(|s| (s.entity_id, *s.alien.snapshot()))
        .collect();
    report.hidden = slots
        .iter()
        .map(|s| (s.entity_id, s.alien.is_hidden()))
        .collect();
    info!(
        ticks = report.ticks,
        packets = report.packets_sent,
        forced_ai = report.forced_ai,
        "server world stopped"
    );
    report
}

fn apply_text(slots: &mut BTreeMap<u64, SimSlot>, report: &mut ClientReport, text: &str) {
    let packet = match decode_packet(text) {
        Ok(packet) => packet,
        Err(e) => {
            report.decode_errors += 1;
            warn!(error = %e, "dropping undecodable packet");
            return;
        }
    };

    let entity_id = packet.entity_id;
    let slot = slots
        .entry(entity_id)
        .or_insert_with(|| SimSlot::new(entity_id, Vec3::ZERO));

    match apply_packet(&mut slot.alien, &mut slot.actor, packet) {
        Ok(Some(_)) => report.packets_applied += 1,
        Ok(None) => {
            report.packets_ignored += 1;
            debug!(entity_id, "ignored packet");
        }
        Err(e) => {
            // Desync indicator; the next dirty tick resends the aspect.
            report.decode_errors += 1;
            warn!(entity_id, error = %e, "rejected aspect record");
        }
    }
}

pub async fn client_world_task(
    tick_interval: Duration,
    mut packet_rx: mpsc::Receiver<String>,
) -> ClientReport {
    let mode = SimHostMode::default();
    let mut slots: BTreeMap<u64, SimSlot> = BTreeMap::new();
    let dt = tick_interval.as_secs_f32();
    let mut interval = tokio::time::interval(tick_interval);
    let mut report = ClientReport::default();

    loop {
        tokio::select! {
            packet = packet_rx.recv() => {
                let Some(text) = packet else {
                    break;
                };
                apply_text(&mut slots, &mut report, &text);
            }
            _ = interval.tick() => {
                report.ticks += 1;
                let info = TickInfo {
                    role: Role::Client,
                    tick: report.ticks,
                    frame_time: dt,
                };
                for slot in slots.values_mut() {
                    slot.tick(info, &mode);
                    follow_request(slot, dt);
                }
            }
        }
    }

    for (id, slot) in &slots {
        let state = slot.debug_dump(Role::Client);
        debug!(entity_id = *id, %state, "final proxy state");
    }
    report.proxies = slots
        .iter()
        .map(|(id, slot)| {
            let state = ProxyState {
                snapshot: *slot.alien.snapshot(),
                hidden: slot.alien.is_hidden(),
                speed: slot.alien.stats().speed,
                requests: slot.host.locomotion.request_count,
            };
            (*id, state)
        })
        .collect();
    info!(
        ticks = report.ticks,
        applied = report.packets_applied,
        rejected = report.decode_errors,
        "client world stopped"
    );
    report
}
