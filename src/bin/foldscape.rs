use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use foldscape::{
    EngineConfig, FfmpegSink, FfmpegSinkOpts, Fps, FrameSink, HeadlessHost, HeadlessOpts,
    HostEvent, HostScript, LastFrameSink, PngSequenceSink,
};

#[derive(Parser, Debug)]
#[command(name = "foldscape", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Advance the animation and write a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a run as an MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
    /// Print the default engine configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Logical surface width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical surface height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Seed for a reproducible element set.
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Number of frames to advance before capturing (at least 1).
    #[arg(long, default_value_t = 60)]
    frame: u64,

    /// Pointer position `x,y` held for the whole run.
    #[arg(long, value_parser = parse_pointer)]
    pointer: Option<(f64, f64)>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Wall-clock frames to run.
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Output frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Host event script JSON.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Output path: `*.mp4` streams to ffmpeg, anything else is a PNG sequence directory.
    #[arg(long)]
    out: PathBuf,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_pointer(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("pointer x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("pointer y: {e}"))?;
    Ok((x, y))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_path(p)
            .with_context(|| format!("load engine config '{}'", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn build_host(surface: &SurfaceArgs, fps: Fps) -> anyhow::Result<HeadlessHost> {
    let config = load_config(surface.config.as_deref())?;
    let host = HeadlessHost::new(HeadlessOpts {
        width: surface.width,
        height: surface.height,
        scale: surface.scale,
        seed: surface.seed,
        fps,
        config,
    })?;
    Ok(host)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut host = build_host(&args.surface, Fps::new(60, 1)?)?;
    if let Some((x, y)) = args.pointer {
        host.apply(&HostEvent::PointerMove { x, y })?;
    }

    let mut sink = LastFrameSink::new();
    host.run(args.frame.max(1), &HostScript::default(), &mut sink)?;
    let (_, frame) = sink
        .into_last()
        .context("no frame was rendered (is the surface empty?)")?;

    foldscape::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    let mut host = build_host(&args.surface, fps)?;
    let script = match &args.script {
        Some(p) => HostScript::from_path(p)
            .with_context(|| format!("load host script '{}'", p.display()))?,
        None => HostScript::default(),
    };

    let is_mp4 = args
        .out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"));
    let mut sink: Box<dyn FrameSink> = if is_mp4 {
        Box::new(FfmpegSink::new(FfmpegSinkOpts {
            out_path: args.out.clone(),
            overwrite: args.overwrite,
            bg_rgba: [0, 0, 0, 255],
        }))
    } else {
        Box::new(PngSequenceSink::new(args.out.clone()))
    };

    let stats = host.run(args.frames, &script, sink.as_mut())?;
    tracing::info!(?stats, "render finished");

    eprintln!(
        "wrote {} ({} rendered, {} skipped)",
        args.out.display(),
        stats.rendered,
        stats.skipped
    );
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let json = EngineConfig::default().to_json_pretty()?;
    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json.as_bytes())
                .with_context(|| format!("write config '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
