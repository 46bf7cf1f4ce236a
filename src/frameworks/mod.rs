// Frameworks layer: runtime bootstrap, env config and the loopback host.

pub mod config;
pub mod host;
pub mod server;
pub mod world;
