use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{FoldError, FoldResult};
use crate::render::frame::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Write `frame` as a straight-alpha PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> FoldResult<()> {
    if frame.width == 0 || frame.height == 0 {
        return Err(FoldError::encode("cannot write an empty frame as PNG"));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| FoldError::encode(format!("write png '{}': {e}", path.display())))
}

/// Sink writing `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
    fps: Option<Fps>,
}

impl PngSequenceSink {
    /// Write frames into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
            fps: None,
        }
    }

    /// Number of files written.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Path of the file for frame `idx`.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> FoldResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.written = 0;
        self.fps = Some(cfg.fps);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FoldResult<()> {
        write_png(&self.path_for(idx), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> FoldResult<()> {
        tracing::debug!(
            dir = %self.dir.display(),
            frames = self.written,
            fps = ?self.fps,
            "png sequence written"
        );
        Ok(())
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        match u16::from(px[3]) {
            0 => px[..3].fill(0),
            255 => {}
            a => {
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
