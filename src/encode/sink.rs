use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::FoldResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Frame width in device pixels at the start of the run.
    pub width: u32,
    /// Frame height in device pixels at the start of the run.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FoldResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FoldResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> FoldResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FoldResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FoldResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FoldResult<()> {
        Ok(())
    }
}

/// Sink that keeps only the most recent frame.
#[derive(Debug, Default)]
pub struct LastFrameSink {
    last: Option<(FrameIndex, FrameRGBA)>,
    pushed: u64,
}

impl LastFrameSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame, if any was pushed.
    pub fn last(&self) -> Option<&(FrameIndex, FrameRGBA)> {
        self.last.as_ref()
    }

    /// Consume the sink, returning the most recent frame.
    pub fn into_last(self) -> Option<(FrameIndex, FrameRGBA)> {
        self.last
    }

    /// Number of frames pushed since `begin`.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }
}

impl FrameSink for LastFrameSink {
    fn begin(&mut self, _cfg: SinkConfig) -> FoldResult<()> {
        self.last = None;
        self.pushed = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FoldResult<()> {
        match self.last.as_mut() {
            Some(slot) => {
                slot.0 = idx;
                slot.1.clone_from(frame);
            }
            None => self.last = Some((idx, frame.clone())),
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> FoldResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
