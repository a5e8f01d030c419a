use super::*;
use serde_json::json;

#[test]
fn parses_short_long_and_alpha_hex() {
    let c: ColorDef = serde_json::from_value(json!("#f00")).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgb(255, 0, 0));

    let c: ColorDef = serde_json::from_value(json!("#0a0a0f")).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgb(10, 10, 15));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgba(0, 0, 255, 128));
}

#[test]
fn rejects_bad_hex() {
    assert!(serde_json::from_value::<ColorDef>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<ColorDef>(json!("#gg0000")).is_err());
}

#[test]
fn parses_objects_and_arrays() {
    let c: ColorDef = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgb(255, 128, 0));

    let c: ColorDef = serde_json::from_value(json!([0.0, 0.0, 1.0, 0.5])).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgba(0, 0, 255, 128));

    let c: ColorDef = serde_json::from_value(json!({"h": 120.0, "s": 1.0, "l": 0.5})).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgb(0, 255, 0));

    assert!(serde_json::from_value::<ColorDef>(json!([1.0, 2.0])).is_err());
}

#[test]
fn serializes_as_hex() {
    let v = serde_json::to_value(ColorDef(Rgba8::rgb(255, 16, 1))).unwrap();
    assert_eq!(v, json!("#ff1001"));
    let v = serde_json::to_value(ColorDef(Rgba8::rgba(0, 0, 0, 128))).unwrap();
    assert_eq!(v, json!("#00000080"));
}
