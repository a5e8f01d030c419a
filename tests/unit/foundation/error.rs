use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FoldError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FoldError::render("x").to_string().contains("render error:"));
    assert!(FoldError::encode("x").to_string().contains("encode error:"));
    assert!(
        FoldError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FoldError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
