//! The animation engine: element generation, per-frame update, run state and scheduling.

/// The engine itself.
pub mod animation;
pub(crate) mod generate;
/// Frame scheduling contract.
pub mod scheduler;
/// Run state machine.
pub mod state;
pub(crate) mod update;
