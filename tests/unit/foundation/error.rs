use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LogoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LogoError::template("x")
            .to_string()
            .contains("template error:")
    );
    assert!(LogoError::render("x").to_string().contains("render error:"));
    assert!(
        LogoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LogoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
