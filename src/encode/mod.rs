//! Frame sinks.
//!
//! Sinks consume rendered frames in wall-clock order and are used by
//! [`crate::host::headless::HeadlessHost::run`].

/// `ffmpeg`-based MP4 output via the system `ffmpeg`.
pub mod ffmpeg;
/// PNG output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
