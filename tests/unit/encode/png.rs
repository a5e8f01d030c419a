use super::*;

#[test]
fn unpremultiply_restores_straight_color() {
    let mut px = vec![64u8, 32, 0, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[1, 2, 3, 255]);
}

#[test]
fn empty_frame_is_rejected() {
    let err = write_png(Path::new("target/never.png"), &FrameRGBA::empty()).unwrap_err();
    assert!(matches!(err, FoldError::Encode(_)));
}

#[test]
fn sequence_names_are_zero_padded() {
    let sink = PngSequenceSink::new("out");
    assert_eq!(
        sink.path_for(FrameIndex(7)),
        PathBuf::from("out").join("frame_00007.png")
    );
}
