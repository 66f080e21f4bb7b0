use super::*;

fn find_system_font() -> Option<Vec<u8>> {
    const DIRS: &[&str] = &[
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/System/Library/Fonts",
        "C:\\Windows\\Fonts",
    ];
    fn walk(dir: &std::path::Path, depth: usize) -> Option<std::path::PathBuf> {
        if depth > 4 {
            return None;
        }
        let entries = std::fs::read_dir(dir).ok()?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                if let Some(found) = walk(&path, depth + 1) {
                    return Some(found);
                }
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
            {
                return Some(path);
            }
        }
        None
    }
    DIRS.iter()
        .find_map(|d| walk(std::path::Path::new(d), 0))
        .and_then(|p| std::fs::read(p).ok())
}

#[test]
fn monospace_measures_chars_times_advance() {
    let mut m = MonospaceMeasurer { advance_em: 0.5 };
    let font = FontDescriptor::new("Inter", 400.0, 20.0);
    assert_eq!(m.measure("abcd", &font).unwrap(), 40.0);
    assert_eq!(m.measure("", &font).unwrap(), 0.0);

    let spaced = FontDescriptor {
        letter_spacing_px: 2.0,
        ..font
    };
    assert_eq!(m.measure("ab", &spaced).unwrap(), 24.0);
}

#[test]
fn invalid_font_size_is_a_measurement_error() {
    let mut m = MonospaceMeasurer::default();
    let font = FontDescriptor::new("Inter", 400.0, 0.0);
    assert!(matches!(
        m.measure("x", &font),
        Err(StyleError::Measurement(_))
    ));
}

#[test]
fn parley_without_fonts_is_unavailable() {
    let mut m = ParleyMeasurer::new();
    let font = FontDescriptor::new("Inter", 400.0, 16.0);
    assert!(matches!(
        m.measure("hello", &font),
        Err(StyleError::Measurement(_))
    ));
}

#[test]
fn parley_rejects_garbage_font_bytes() {
    let mut m = ParleyMeasurer::new();
    assert!(m.register_font(vec![0u8; 16]).is_err());
    assert!(m.families().is_empty());
}

#[test]
fn parley_width_grows_with_text() {
    let Some(bytes) = find_system_font() else {
        eprintln!("no system ttf found; skipping parley measurement check");
        return;
    };
    let mut m = ParleyMeasurer::new();
    let family = m.register_font(bytes).unwrap();
    let font = FontDescriptor::new(family, 400.0, 24.0);

    let short = m.measure("Hi", &font).unwrap();
    let long = m.measure("Hi there, flipbook", &font).unwrap();
    assert!(short > 0.0);
    assert!(long > short);

    let unknown = FontDescriptor::new("Definitely Not Installed", 400.0, 24.0);
    assert_eq!(m.measure("Hi", &unknown).unwrap(), short);
}
