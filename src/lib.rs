//! Foldscape is a decorative background animation: slowly drifting, rotating, paper-folding
//! squares over a faint wavy grid, with soft pointer repulsion and an edge vignette.
//!
//! The engine is host-agnostic:
//!
//! - Build an [`AnimationEngine`] with a [`FrameScheduler`] and bind a [`DrawSurface`]
//! - Forward resize, pointer and visibility events between frames
//! - Call [`AnimationEngine::on_frame`] whenever the scheduler fires
//!
//! [`HeadlessHost`] drives the engine offline over a [`CpuSurface`] and streams frames into a
//! [`FrameSink`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame sinks (PNG, MP4, in-memory).
pub mod encode;
/// Animation engine.
pub mod engine;
/// Headless hosting.
pub mod host;
/// Drawing surfaces and the frame painter.
pub mod render;
/// Configuration and element model.
pub mod scene;

pub use crate::foundation::core::{Affine, Fps, FrameIndex, Point, Rect, Rgba8, SurfaceSize, Vec2};
pub use crate::foundation::error::{FoldError, FoldResult};
pub use crate::foundation::rng::{RandomSource, Rng64};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, LastFrameSink, SinkConfig};
pub use crate::engine::animation::AnimationEngine;
pub use crate::engine::scheduler::FrameScheduler;
pub use crate::engine::state::RunState;
pub use crate::host::headless::{HeadlessHost, HeadlessOpts, RunStats};
pub use crate::host::scheduler::ManualScheduler;
pub use crate::host::script::{HostEvent, HostScript, ScheduledEvent};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::record::{DrawCommand, RecordingSurface};
pub use crate::render::surface::{DrawSurface, RadialGradient};
pub use crate::scene::color::ColorDef;
pub use crate::scene::config::{EngineConfig, Theme};
pub use crate::scene::element::{DecorativeElement, Oscillation};
