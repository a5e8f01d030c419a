use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FoldError, FoldResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Where and how [`FfmpegSink`] writes its video.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Destination `.mp4`.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Straight-alpha color shown through translucent pixels.
    pub bg_rgba: [u8; 4],
}

impl FfmpegSinkOpts {
    /// Overwriting output to `out_path` over a black background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// MP4 sink: pipes opaque RGBA frames into a child `ffmpeg` encoding H.264.
///
/// The stream size is fixed by `begin`; frames of any other size are rejected.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Idle sink; the encoder process starts in `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    fn encoder_command(&self, cfg: &SinkConfig) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if self.opts.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error"]);
        // Raw straight RGBA on stdin; the rate goes before `-i` so it applies to the input.
        cmd.args(["-f", "rawvideo", "-pix_fmt", "rgba"])
            .arg("-s")
            .arg(format!("{}x{}", cfg.width, cfg.height))
            .arg("-r")
            .arg(format!("{}/{}", cfg.fps.num, cfg.fps.den))
            .args(["-i", "pipe:0"]);
        cmd.args(["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(&self.opts.out_path);
        cmd
    }

    fn check_geometry(cfg: &SinkConfig) -> FoldResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FoldError::validation(format!(
                "cannot encode a {}x{} surface",
                cfg.width, cfg.height
            )));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(FoldError::validation(format!(
                "yuv420p needs even frame dimensions, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> FoldResult<()> {
        Self::check_geometry(&cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(FoldError::validation(format!(
                "refusing to replace '{}' (overwrite disabled)",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(FoldError::encode("mp4 output needs `ffmpeg` on PATH"));
        }

        let mut child = self
            .encoder_command(&cfg)
            .spawn()
            .map_err(|e| FoldError::encode(format!("could not start ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FoldError::encode("ffmpeg started without a stdin pipe"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| FoldError::encode("ffmpeg started without a stderr pipe"))?;
        // ffmpeg blocks once its stderr pipe fills up, so it is read concurrently.
        let stderr_drain = std::thread::spawn(move || {
            let mut log = Vec::new();
            stderr.read_to_end(&mut log)?;
            Ok(log)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "ffmpeg encoder spawned"
        );
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FoldResult<()> {
        let Some(cfg) = self.cfg.as_ref() else {
            return Err(FoldError::encode("push_frame called before begin"));
        };
        if self.last_idx.is_some_and(|last| idx <= last) {
            return Err(FoldError::encode(format!(
                "frame {} arrived after frame {}",
                idx.0,
                self.last_idx.map_or(0, |l| l.0)
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(FoldError::encode(format!(
                "surface resized to {}x{} while encoding a {}x{} stream",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);

        composite_onto_background(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(FoldError::encode("push_frame called after end"));
        };
        use std::io::Write as _;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| FoldError::encode(format!("ffmpeg pipe closed at frame {}: {e}", idx.0)))
    }

    fn end(&mut self) -> FoldResult<()> {
        // Closing stdin is ffmpeg's end-of-stream.
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Err(FoldError::encode("end called before begin"));
        };

        let status = child
            .wait()
            .map_err(|e| FoldError::encode(format!("waiting on ffmpeg: {e}")))?;
        let log = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| FoldError::encode("ffmpeg log reader panicked"))?
                .map_err(|e| FoldError::encode(format!("reading ffmpeg log: {e}")))?,
            None => Vec::new(),
        };
        self.cfg = None;

        if status.success() {
            tracing::debug!(frames = ?self.last_idx, "ffmpeg encoder finished");
            Ok(())
        } else {
            Err(FoldError::encode(format!(
                "ffmpeg failed ({status}): {}",
                String::from_utf8_lossy(&log).trim()
            )))
        }
    }
}

/// Write `src` composited over an opaque `bg` into `dst` as opaque RGBA8.
///
/// `src` is premultiplied when `premultiplied` is set, straight alpha otherwise.
fn composite_onto_background(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    bg: [u8; 4],
) -> FoldResult<()> {
    if dst.len() != src.len() || !src.len().is_multiple_of(4) {
        return Err(FoldError::encode(format!(
            "frame holds {} bytes, expected {}",
            src.len(),
            dst.len()
        )));
    }

    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(px[3]);
        let under = 255 - a;
        for ((o, &c), &b) in out.iter_mut().zip(&px[..3]).zip(&bg[..3]) {
            let fg = if premultiplied {
                u16::from(c)
            } else {
                mul_div255_u16(u16::from(c), a)
            };
            *o = (fg + mul_div255_u16(u16::from(b), under)).min(255) as u8;
        }
        out[3] = 255;
    }
    Ok(())
}

/// Create the directory `path` will be written into.
pub fn ensure_parent_dir(path: &Path) -> FoldResult<()> {
    use anyhow::Context as _;
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("create output dir '{}'", parent.display()))?;
    Ok(())
}

/// Whether `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
