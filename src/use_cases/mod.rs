// Use cases layer: per-tick replication workflows for aliens.

pub mod alien;
pub mod context;
pub mod coop;
pub mod extract;
pub mod reconstruct;
pub mod scope;
pub mod test_support;
pub mod visibility;

pub use alien::Alien;
pub use context::TickContext;
pub use coop::CoopSystem;
pub use scope::DedicatedServerScope;
pub use visibility::Visibility;
