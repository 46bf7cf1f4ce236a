// Interface adapters: wire protocol, field streams and diagnostics.

pub mod codec;
pub mod debug;
pub mod protocol;
pub mod stream;
