use super::*;
use crate::foundation::core::Fps;

#[test]
fn transparent_pixel_shows_background() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    composite_onto_background(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixel_passes_through() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    composite_onto_background(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn straight_alpha_is_premultiplied_before_compositing() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    composite_onto_background(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_odd/out.mp4"));
    let err = sink
        .begin(SinkConfig {
            width: 31,
            height: 20,
            fps: Fps::new(30, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, FoldError::Validation(_)));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unstarted/out.mp4"));
    assert!(sink.push_frame(FrameIndex(0), &FrameRGBA::empty()).is_err());
}

#[test]
fn mismatched_buffer_sizes_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(composite_onto_background(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn encoder_reads_rational_rate_from_stdin() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_cmd/out.mp4"));
    let cmd = sink.encoder_command(&SinkConfig {
        width: 64,
        height: 48,
        fps: Fps::new(30000, 1001).unwrap(),
    });
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let at = |flag: &str| args.iter().position(|a| a == flag).unwrap();
    assert_eq!(args[at("-s") + 1], "64x48");
    assert_eq!(args[at("-r") + 1], "30000/1001");
    assert!(at("-r") < at("-i"));
    assert_eq!(args.last().map(String::as_str), Some("target/ffmpeg_cmd/out.mp4"));
}
