use super::*;

#[test]
fn constructors_map_to_variants() {
    assert!(matches!(
        SoniformError::validation("x"),
        SoniformError::Validation(_)
    ));
    assert!(matches!(
        SoniformError::evaluation("x"),
        SoniformError::Evaluation(_)
    ));
    assert!(matches!(SoniformError::export("x"), SoniformError::Export(_)));
}

#[test]
fn display_carries_message() {
    let e = SoniformError::validation("bad band count");
    assert_eq!(e.to_string(), "validation error: bad band count");
    let e = SoniformError::export("ffmpeg missing");
    assert_eq!(e.to_string(), "export error: ffmpeg missing");
}

#[test]
fn anyhow_errors_wrap_transparently() {
    let inner = anyhow::anyhow!("decode failed");
    let e: SoniformError = inner.into();
    assert_eq!(e.to_string(), "decode failed");
}
