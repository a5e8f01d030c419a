use crate::engine::generate::generate_elements;
use crate::engine::scheduler::FrameScheduler;
use crate::engine::state::RunState;
use crate::engine::update::step_element;
use crate::foundation::core::{Point, SurfaceSize};
use crate::foundation::error::FoldResult;
use crate::foundation::rng::{RandomSource, Rng64};
use crate::render::painter::paint_frame;
use crate::render::surface::DrawSurface;
use crate::scene::config::EngineConfig;
use crate::scene::element::DecorativeElement;

/// The folding-squares background animation.
///
/// The engine is an explicitly owned instance: the host constructs it, binds a surface with
/// [`AnimationEngine::initialize`], forwards resize/pointer/visibility events, and calls
/// [`AnimationEngine::on_frame`] whenever the scheduler fires. Everything runs on the host's
/// thread; inputs are applied between frames.
///
/// Frame loop states are `Stopped -> Running -> Stopped | ShutDown`. Only `Running` issues
/// frame requests, and at most one request is outstanding at a time.
pub struct AnimationEngine<S, D> {
    config: EngineConfig,
    rng: Box<dyn RandomSource>,
    scheduler: S,
    surface: Option<D>,
    size: SurfaceSize,
    elements: Vec<DecorativeElement>,
    frame: u64,
    epoch: u64,
    pointer: Option<Point>,
    state: RunState,
    frame_requested: bool,
}

impl<S, D> AnimationEngine<S, D>
where
    S: FrameScheduler,
    D: DrawSurface,
{
    /// Create an engine with an entropy-seeded random source.
    pub fn new(config: EngineConfig, scheduler: S) -> FoldResult<Self> {
        Self::with_rng(config, scheduler, Box::new(Rng64::from_entropy()))
    }

    /// Create an engine whose element sets are reproducible for a given `seed`.
    pub fn with_seed(config: EngineConfig, scheduler: S, seed: u64) -> FoldResult<Self> {
        Self::with_rng(config, scheduler, Box::new(Rng64::new(seed)))
    }

    /// Create an engine drawing its randomness from `rng`.
    pub fn with_rng(
        config: EngineConfig,
        scheduler: S,
        rng: Box<dyn RandomSource>,
    ) -> FoldResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            scheduler,
            surface: None,
            size: SurfaceSize::empty(),
            elements: Vec::new(),
            frame: 0,
            epoch: 0,
            pointer: None,
            state: RunState::Stopped,
            frame_requested: false,
        })
    }

    /// Bind `surface`, measure it, generate the first element set and start the frame loop.
    ///
    /// `None` is a no-op. Calling it again rebinds to the new surface and starts a new epoch.
    #[tracing::instrument(skip(self, surface), fields(has_surface = surface.is_some()))]
    pub fn initialize(&mut self, surface: Option<D>) {
        if self.state.is_shut_down() {
            tracing::warn!("initialize after shutdown ignored");
            return;
        }
        let Some(surface) = surface else {
            return;
        };
        self.surface = Some(surface);
        self.regenerate();
        self.set_running(true);
    }

    /// Re-measure the surface and regenerate every element from scratch.
    ///
    /// The new set is used from the next frame on; the frame counter is not reset.
    #[tracing::instrument(skip(self))]
    pub fn on_resize(&mut self) {
        if self.state.is_shut_down() || self.surface.is_none() {
            return;
        }
        self.regenerate();
    }

    /// Record the pointer position relative to the surface's top-left corner.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = if x.is_finite() && y.is_finite() {
            Some(Point::new(x, y))
        } else {
            None
        };
    }

    /// Forget the pointer (it left the surface). No repulsion is applied until it returns.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Pause or resume the frame loop. State is kept; the frame counter continues from where it
    /// stopped.
    pub fn set_running(&mut self, running: bool) {
        if self.state.is_shut_down() {
            tracing::warn!(running, "set_running after shutdown ignored");
            return;
        }
        if running && self.surface.is_none() {
            tracing::debug!("set_running(true) without a surface ignored");
            return;
        }
        let next = self.state.with_running(running);
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, frame = self.frame, "run state");
        }
        self.state = next;
        if self.state.is_running() {
            self.request_frame();
        }
    }

    /// Stop the frame loop permanently. Idempotent.
    pub fn shutdown(&mut self) {
        if self.state.is_shut_down() {
            return;
        }
        tracing::debug!(frame = self.frame, "shutdown");
        self.state = RunState::ShutDown;
        if self.frame_requested {
            self.scheduler.cancel_frame();
            self.frame_requested = false;
        }
    }

    /// Scheduler callback: consume the outstanding request, then update, render and request
    /// the next frame while running.
    ///
    /// Returns `Ok(true)` when a frame was produced. Surface errors propagate to the host; the
    /// frame counter and element state have already advanced when that happens.
    pub fn on_frame(&mut self) -> FoldResult<bool> {
        self.frame_requested = false;
        if !self.state.is_running() {
            return Ok(false);
        }
        self.update();
        self.render()?;
        if self.state.is_running() {
            self.request_frame();
        }
        Ok(true)
    }

    /// Advance the simulation by one frame without drawing.
    pub fn update(&mut self) {
        self.frame += 1;
        let (t, size, pointer) = (self.frame, self.size, self.pointer);
        for el in &mut self.elements {
            step_element(el, t, size, pointer, &self.config);
        }
        tracing::trace!(frame = t, elements = self.elements.len(), "update");
    }

    /// Draw the current state onto the bound surface.
    pub fn render(&mut self) -> FoldResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        paint_frame(surface, &self.elements, self.frame, &self.config)
    }

    /// Current element set, back to front.
    pub fn elements(&self) -> &[DecorativeElement] {
        &self.elements
    }

    /// Frames advanced so far.
    pub fn frame_counter(&self) -> u64 {
        self.frame
    }

    /// Number of element sets generated so far; bumps on every resize.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Size measured at the last regeneration.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Last recorded pointer position.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Frame loop state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Whether a frame request is outstanding.
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bound surface.
    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }

    /// Bound surface, mutably (e.g. to resize it before calling `on_resize`).
    pub fn surface_mut(&mut self) -> Option<&mut D> {
        self.surface.as_mut()
    }

    /// Frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Frame scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn regenerate(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        self.size = surface.size();
        self.epoch += 1;
        self.elements = generate_elements(&self.config, self.size, self.epoch, self.rng.as_mut());
        tracing::debug!(
            epoch = self.epoch,
            width = self.size.width,
            height = self.size.height,
            scale = self.size.scale,
            elements = self.elements.len(),
            "element set regenerated"
        );
    }

    fn request_frame(&mut self) {
        if self.frame_requested {
            return;
        }
        self.frame_requested = true;
        self.scheduler.request_frame();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/animation.rs"]
mod tests;
