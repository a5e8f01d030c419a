/// Frame loop state.
///
/// `Running` is the only state that issues frame requests. `ShutDown` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Not issuing frame requests; state is preserved.
    #[default]
    Stopped,
    /// Each frame re-issues the next request.
    Running,
    /// Permanently stopped.
    ShutDown,
}

impl RunState {
    /// Return `true` in [`RunState::Running`].
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// Return `true` in [`RunState::ShutDown`].
    pub fn is_shut_down(self) -> bool {
        self == Self::ShutDown
    }

    /// State after a pause/resume request. `ShutDown` absorbs everything.
    pub(crate) fn with_running(self, running: bool) -> Self {
        match (self, running) {
            (Self::ShutDown, _) => Self::ShutDown,
            (_, true) => Self::Running,
            (_, false) => Self::Stopped,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/state.rs"]
mod tests;
