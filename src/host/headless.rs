use crate::encode::sink::{FrameSink, SinkConfig};
use crate::engine::animation::AnimationEngine;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::FoldResult;
use crate::host::scheduler::ManualScheduler;
use crate::host::script::{HostEvent, HostScript};
use crate::render::cpu::CpuSurface;
use crate::render::frame::FrameRGBA;
use crate::render::surface::DrawSurface;
use crate::scene::config::EngineConfig;

/// Options for [`HeadlessHost::new`].
#[derive(Clone, Debug)]
pub struct HeadlessOpts {
    /// Initial logical surface width.
    pub width: f64,
    /// Initial logical surface height.
    pub height: f64,
    /// Initial device pixel ratio.
    pub scale: f64,
    /// Seed for reproducible element sets; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Wall-clock frame rate reported to sinks.
    pub fps: Fps,
    /// Engine configuration.
    pub config: EngineConfig,
}

impl Default for HeadlessOpts {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            scale: 1.0,
            seed: None,
            fps: Fps { num: 60, den: 1 },
            config: EngineConfig::default(),
        }
    }
}

/// Counters reported by [`HeadlessHost::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Wall-clock frames on which the engine produced a new frame.
    pub rendered: u64,
    /// Wall-clock frames without a new frame (paused, shut down, or zero-sized surface).
    pub skipped: u64,
    /// Resize events applied.
    pub resizes: u64,
    /// Frames pushed into the sink, including held copies while paused.
    pub pushed: u64,
}

/// Offline host: plays the role of the page, the 2D canvas and the display's frame clock.
///
/// Each wall-clock frame it applies the script events due at that frame, fulfils the engine's
/// outstanding frame request, and forwards the resulting raster to a [`FrameSink`]. While the
/// engine is paused the last frame is held so the output keeps wall-clock timing.
pub struct HeadlessHost {
    engine: AnimationEngine<ManualScheduler, CpuSurface>,
    fps: Fps,
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("fps", &self.fps)
            .field("state", &self.engine.state())
            .field("frame", &self.engine.frame_counter())
            .finish_non_exhaustive()
    }
}

impl HeadlessHost {
    /// Build an engine over a fresh [`CpuSurface`] and initialize it.
    pub fn new(opts: HeadlessOpts) -> FoldResult<Self> {
        let scheduler = ManualScheduler::new();
        let mut engine = match opts.seed {
            Some(seed) => AnimationEngine::with_seed(opts.config, scheduler, seed)?,
            None => AnimationEngine::new(opts.config, scheduler)?,
        };
        let surface = CpuSurface::new(opts.width, opts.height, opts.scale)?;
        engine.initialize(Some(surface));
        Ok(Self {
            engine,
            fps: opts.fps,
        })
    }

    /// Borrow the engine.
    pub fn engine(&self) -> &AnimationEngine<ManualScheduler, CpuSurface> {
        &self.engine
    }

    /// Borrow the engine mutably.
    pub fn engine_mut(&mut self) -> &mut AnimationEngine<ManualScheduler, CpuSurface> {
        &mut self.engine
    }

    /// Forward one host event to the engine.
    pub fn apply(&mut self, event: &HostEvent) -> FoldResult<()> {
        match *event {
            HostEvent::Resize {
                width,
                height,
                scale,
            } => {
                if let Some(surface) = self.engine.surface_mut() {
                    surface.resize(width, height, scale)?;
                }
                self.engine.on_resize();
            }
            HostEvent::PointerMove { x, y } => self.engine.on_pointer_move(x, y),
            HostEvent::PointerLeave => self.engine.clear_pointer(),
            HostEvent::Visibility { visible } => self.engine.set_running(visible),
        }
        Ok(())
    }

    /// Fulfil the outstanding frame request, if any. Returns `Ok(true)` when a frame was drawn.
    pub fn tick(&mut self) -> FoldResult<bool> {
        if !self.engine.scheduler_mut().take_request() {
            return Ok(false);
        }
        self.engine.on_frame()
    }

    /// Last finished raster.
    pub fn frame(&self) -> FrameRGBA {
        self.engine
            .surface()
            .map(CpuSurface::frame)
            .unwrap_or_else(FrameRGBA::empty)
    }

    /// Run `frames` wall-clock frames, applying `script` events (frame numbers are relative to
    /// the start of this run) and pushing output into `sink`.
    #[tracing::instrument(skip(self, script, sink), fields(events = script.events().len()))]
    pub fn run(
        &mut self,
        frames: u64,
        script: &HostScript,
        sink: &mut dyn FrameSink,
    ) -> FoldResult<RunStats> {
        let (width, height) = self
            .engine
            .surface()
            .map(|s| s.size().backing_px())
            .unwrap_or((0, 0));
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.fps,
        })?;

        let mut stats = RunStats::default();
        let mut pending = script.events().iter().peekable();
        let mut held: Option<FrameRGBA> = None;

        for wall in 0..frames {
            while let Some(ev) = pending.next_if(|ev| ev.frame <= wall) {
                if matches!(ev.event, HostEvent::Resize { .. }) {
                    stats.resizes += 1;
                }
                self.apply(&ev.event)?;
            }

            if self.tick()? {
                let frame = self.frame();
                if frame.data.is_empty() {
                    stats.skipped += 1;
                    held = None;
                    continue;
                }
                stats.rendered += 1;
                sink.push_frame(FrameIndex(wall), &frame)?;
                stats.pushed += 1;
                held = Some(frame);
            } else {
                stats.skipped += 1;
                if let Some(frame) = held.as_ref() {
                    sink.push_frame(FrameIndex(wall), frame)?;
                    stats.pushed += 1;
                }
            }
        }

        sink.end()?;
        tracing::debug!(?stats, "headless run finished");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
