use super::*;

#[test]
fn hex_round_trips_case_insensitively() {
    for hex in ["#000000", "#ffffff", "#6366f1", "#A855F7", "#0a0B0c", "#123456"] {
        assert!(rgb_to_hex(hex_to_rgb(hex)).eq_ignore_ascii_case(hex), "{hex}");
    }
}

#[test]
fn malformed_hex_is_black() {
    assert_eq!(hex_to_rgb(""), Rgb::default());
    assert_eq!(hex_to_rgb("#12"), Rgb::default());
    assert_eq!(hex_to_rgb("#12345g"), Rgb::default());
    assert_eq!(hex_to_rgb("#1234567"), Rgb::default());
    assert_eq!(hex_to_rgb("6366F1"), Rgb::new(0x63, 0x66, 0xF1));
}

#[test]
fn strict_hex_gate() {
    assert!(is_strict_hex("#abcdef"));
    assert!(is_strict_hex("ABCDEF"));
    assert!(!is_strict_hex("#abc"));
    assert!(!is_strict_hex("#abcde"));
    assert!(!is_strict_hex("#abcdeg"));
    assert!(!is_strict_hex("##abcdef"));
}

#[test]
fn hsv_round_trip_within_one_per_channel() {
    for r in (0..=255u16).step_by(15) {
        for g in (0..=255u16).step_by(17) {
            for b in (0..=255u16).step_by(51) {
                let rgb = Rgb::new(r as u8, g as u8, b as u8);
                let back = hsv_to_rgb(rgb_to_hsv(rgb));
                assert!((i16::from(back.r) - i16::from(rgb.r)).abs() <= 1, "{rgb:?} {back:?}");
                assert!((i16::from(back.g) - i16::from(rgb.g)).abs() <= 1, "{rgb:?} {back:?}");
                assert!((i16::from(back.b) - i16::from(rgb.b)).abs() <= 1, "{rgb:?} {back:?}");
            }
        }
    }
}

#[test]
fn primary_hues() {
    let red = rgb_to_hsv(Rgb::new(255, 0, 0));
    assert_eq!((red.h, red.s, red.v), (0.0, 1.0, 1.0));
    let green = rgb_to_hsv(Rgb::new(0, 255, 0));
    assert!((green.h - 120.0).abs() < 1e-9);
    let magenta = rgb_to_hsv(Rgb::new(255, 0, 255));
    assert!((magenta.h - 300.0).abs() < 1e-9);
    let gray = rgb_to_hsv(Rgb::new(128, 128, 128));
    assert_eq!(gray.h, 0.0);
    assert_eq!(gray.s, 0.0);
}

#[test]
fn hue_is_normalized_into_range() {
    let rgb = hsv_to_rgb(Hsv {
        h: 360.0,
        s: 1.0,
        v: 1.0,
    });
    assert_eq!(rgb, Rgb::new(255, 0, 0));
    let rgb = hsv_to_rgb(Hsv {
        h: -120.0,
        s: 1.0,
        v: 1.0,
    });
    assert_eq!(rgb, Rgb::new(0, 0, 255));
}

#[test]
fn percent_scale_is_converted_at_the_boundary() {
    let hsv = Hsv {
        h: 200.0,
        s: 0.456,
        v: 0.9,
    };
    let p = hsv.to_percent();
    assert_eq!((p.s, p.v), (46, 90));
    let back = Hsv::from_percent(p);
    assert!((back.s - 0.46).abs() < 1e-9);
    assert!((back.v - 0.9).abs() < 1e-9);
}

#[test]
fn color_value_set_hex_rejects_partial_input() {
    let mut c = ColorValue::from_hex("#6366F1").unwrap();
    assert!(!c.set_hex("#63"));
    assert_eq!(c.hex(), "#6366F1");
    assert!(c.set_hex("a855f7"));
    assert_eq!(c.hex(), "#A855F7");
}

#[test]
fn color_value_serializes_as_hex_string() {
    let c = ColorValue::from_rgb(Rgb::new(1, 2, 3));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#010203\"");
    let back: ColorValue = serde_json::from_str("\"#010203\"").unwrap();
    assert_eq!(back, c);
    assert!(serde_json::from_str::<ColorValue>("\"#0102\"").is_err());
}

#[test]
fn css_color_forms() {
    let c = parse_css_color("rgb(0, 0, 0)").unwrap();
    assert_eq!(c.rgb, Rgb::new(0, 0, 0));
    assert_eq!(c.alpha, 1.0);

    let c = parse_css_color("rgba(99,102,241,0.5)").unwrap();
    assert_eq!(c.rgb, Rgb::new(99, 102, 241));
    assert_eq!(c.alpha, 0.5);

    let c = parse_css_color("rgb(10 20 30 / 25%)").unwrap();
    assert_eq!(c.rgb, Rgb::new(10, 20, 30));
    assert_eq!(c.alpha, 0.25);

    let c = parse_css_color("#f0a").unwrap();
    assert_eq!(c.rgb, Rgb::new(0xff, 0x00, 0xaa));

    let c = parse_css_color("#00000080").unwrap();
    assert!((c.alpha - 128.0 / 255.0).abs() < 1e-9);

    assert_eq!(parse_css_color("transparent").unwrap().alpha, 0.0);
    assert!(parse_css_color("to right").is_none());
    assert!(parse_css_color("rgba(1,2)").is_none());
    assert!(parse_css_color("45deg").is_none());
}

#[test]
fn css_rgba_uses_trimmed_alpha() {
    let c = ColorValue::from_rgb(Rgb::new(99, 102, 241));
    assert_eq!(c.to_css_rgba(100), "rgba(99,102,241,1)");
    assert_eq!(c.to_css_rgba(50), "rgba(99,102,241,0.5)");
}
