use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SeqError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SeqError::not_found("x").to_string().contains("not found:"));
}

#[test]
fn not_found_is_distinguishable() {
    assert!(SeqError::not_found("kf").is_not_found());
    assert!(!SeqError::validation("kf").is_not_found());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SeqError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
