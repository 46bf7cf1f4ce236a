use crate::domain::ports::HostMode;

/// Holds the engine in dedicated-server compatibility mode for as long as it lives.
///
/// Exit runs on drop, so early returns and unwinding still leave the mode balanced.
#[must_use = "the mode is exited as soon as the guard is dropped"]
pub struct DedicatedServerScope<'a> {
    mode: &'a dyn HostMode,
}

impl<'a> DedicatedServerScope<'a> {
    pub fn enter(mode: &'a dyn HostMode) -> Self {
        mode.enter_dedicated_server();
        Self { mode }
    }
}

impl Drop for DedicatedServerScope<'_> {
    fn drop(&mut self) {
        self.mode.exit_dedicated_server();
    }
}
