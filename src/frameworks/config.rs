use std::{env, time::Duration};

// Runtime constants for the loopback host (not gameplay tuning).

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

pub fn tick_rate_hz() -> u32 {
    env_parse::<u32>("SYNC_TICK_HZ")
        .filter(|hz| *hz > 0)
        .unwrap_or(30)
}

pub fn tick_interval() -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(tick_rate_hz()))
}

pub fn actor_count() -> usize {
    env_parse("SYNC_ACTOR_COUNT").unwrap_or(4)
}

// 0 keeps the loopback running until the process is stopped.
pub fn run_ticks() -> u64 {
    env_parse("SYNC_RUN_TICKS").unwrap_or(300)
}

pub const PACKET_CHANNEL_CAPACITY: usize = 1024;

// Every this many ticks the server toggles one alien's visibility.
pub const HIDE_TOGGLE_INTERVAL: u64 = 45;
// Tick at which the first alien is killed so its ALIVE aspect goes quiet.
pub const SCRIPTED_DEATH_TICK: u64 = 120;
