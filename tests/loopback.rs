mod support;

use alien_sync::run;
use std::sync::Arc;
use support::quick_settings;
use tokio::sync::Notify;

// Quantized world points land within half a step of the source.
const WORLD_TOLERANCE: f32 = 1.0 / 256.0 + 1e-4;

#[tokio::test]
async fn proxies_converge_on_the_last_replicated_state() {
    let summary = run(quick_settings(120), Arc::new(Notify::new()))
        .await
        .expect("loopback should finish");
    let server = &summary.server;
    let client = &summary.client;

    assert_eq!(server.ticks, 120);
    assert_eq!(server.encode_errors, 0);
    assert_eq!(server.forced_ai, 1);
    assert_eq!(client.decode_errors, 0);
    assert_eq!(client.packets_ignored, 0);
    assert_eq!(client.packets_applied, server.packets_sent);
    assert_eq!(client.proxies.len(), 3);

    for (id, authoritative) in &server.snapshots {
        let proxy = client.proxies.get(id).expect("every alien has a proxy");
        let snapshot = proxy.snapshot;
        assert!(snapshot.move_target.abs_diff_eq(authoritative.move_target, WORLD_TOLERANCE));
        assert!(snapshot.aim_target.abs_diff_eq(authoritative.aim_target, WORLD_TOLERANCE));
        assert!(snapshot.look_target.abs_diff_eq(authoritative.look_target, WORLD_TOLERANCE));
        assert_eq!(snapshot.desired_speed, authoritative.desired_speed);
        assert_eq!(snapshot.stance, authoritative.stance);
        assert_eq!(snapshot.has_aim_target, authoritative.has_aim_target);
        assert_eq!(proxy.hidden, server.hidden[id]);
    }
}

#[tokio::test]
async fn the_dead_alien_goes_quiet() {
    let summary = run(quick_settings(60), Arc::new(Notify::new()))
        .await
        .expect("loopback should finish");

    // Two aliens replicate ALIVE every tick; the first only until it dies at tick 20.
    let alive_packets = 19 + 2 * 60;
    // Hide toggles at ticks 10, 20, .. 60.
    let hide_packets = 6;
    assert_eq!(summary.server.packets_sent, alive_packets + hide_packets);
}

#[tokio::test]
async fn shutdown_stops_an_unbounded_run() {
    let shutdown = Arc::new(Notify::new());
    shutdown.notify_one();

    let summary = run(quick_settings(0), shutdown)
        .await
        .expect("loopback should stop");

    assert!(summary.server.ticks < 10);
}
