//! Headless hosting: a manual frame scheduler, scripted host events and an offline runner.

/// Offline runner around a CPU surface.
pub mod headless;
/// Manual frame scheduler.
pub mod scheduler;
/// Scripted host events.
pub mod script;
