use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StyleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StyleError::gradient("x")
            .to_string()
            .contains("gradient error:")
    );
    assert!(
        StyleError::measurement("x")
            .to_string()
            .contains("measurement error:")
    );
    assert!(
        StyleError::unsupported("x")
            .to_string()
            .contains("unsupported capability:")
    );
    assert!(StyleError::render("x").to_string().contains("render error:"));
    assert!(
        StyleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StyleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: StyleError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, StyleError::Serde(_)));
}
