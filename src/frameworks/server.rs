// Framework bootstrap for the loopback replication runtime.

use crate::domain::Role;
use crate::frameworks::config;
use crate::frameworks::world::{
    ClientReport, ServerReport, WorldSettings, client_world_task, server_world_task,
};

use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, mpsc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Reports from both ends of a finished loopback run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub server: ServerReport,
    pub client: ClientReport,
}

pub fn settings_from_env() -> WorldSettings {
    WorldSettings {
        server_role: Role::DedicatedServer,
        actor_count: config::actor_count(),
        tick_interval: config::tick_interval(),
        run_ticks: config::run_ticks(),
        hide_toggle_interval: config::HIDE_TOGGLE_INTERVAL,
        death_tick: config::SCRIPTED_DEATH_TICK,
    }
}

/// Runs an authoritative world and a proxy world connected by a packet channel.
///
/// The server stops after `settings.run_ticks` ticks or when `shutdown` is notified; the
/// client drains every packet already sent before it stops.
pub async fn run(settings: WorldSettings, shutdown: Arc<Notify>) -> Result<RunSummary> {
    let (packet_tx, packet_rx) = mpsc::channel::<String>(config::PACKET_CHANNEL_CAPACITY);

    let server = tokio::spawn(server_world_task(settings, packet_tx, shutdown));
    let client = tokio::spawn(client_world_task(settings.tick_interval, packet_rx));

    let server = server.await.map_err(std::io::Error::other)?;
    let client = client.await.map_err(std::io::Error::other)?;
    Ok(RunSummary { server, client })
}

pub async fn run_with_config() -> Result<RunSummary> {
    init_runtime();

    let settings = settings_from_env();
    tracing::info!(
        actors = settings.actor_count,
        tick_ms = settings.tick_interval.as_millis(),
        run_ticks = settings.run_ticks,
        "starting loopback"
    );

    let shutdown = Arc::new(Notify::new());
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            ctrl_c.notify_one();
        }
    });

    let summary = run(settings, shutdown).await.inspect_err(|e| {
        tracing::error!(error = %e, "world task failed");
    })?;
    tracing::info!(
        sent = summary.server.packets_sent,
        applied = summary.client.packets_applied,
        rejected = summary.client.decode_errors,
        "loopback finished"
    );
    Ok(summary)
}
