use super::*;

#[test]
fn defaults_are_black_fill_and_invisible_stroke() {
    let s = ElementStyleState::default();
    assert_eq!(s.fill.paint, Paint::Solid(ColorValue::BLACK));
    assert_eq!(s.fill.opacity, 100);
    assert!(!s.stroke.is_visible());
    assert_eq!(s.stroke.position, StrokePosition::Outside);
}

#[test]
fn partial_hex_is_rejected_without_change() {
    let mut s = ElementStyleState::default();
    assert!(!s.apply(&StyleEdit::ColorHex(PaintTarget::Fill, "#ff".into())));
    assert_eq!(s, ElementStyleState::default());
    assert!(s.apply(&StyleEdit::ColorHex(PaintTarget::Fill, "#ff0000".into())));
    assert_eq!(s.fill.paint, Paint::Solid(ColorValue::from_hex("#FF0000").unwrap()));
}

#[test]
fn opacity_is_clamped() {
    let mut s = ElementStyleState::default();
    s.apply(&StyleEdit::Opacity(PaintTarget::Fill, 150.0));
    assert_eq!(s.fill.opacity, 100);
    s.apply(&StyleEdit::Opacity(PaintTarget::Stroke, -20.0));
    assert_eq!(s.stroke.opacity, 0);
}

#[test]
fn switching_fill_kind_seeds_gradient_from_solid() {
    let mut s = ElementStyleState::default();
    let red = ColorValue::from_hex("#FF0000").unwrap();
    s.apply(&StyleEdit::Color(PaintTarget::Fill, red));
    assert!(s.apply(&StyleEdit::FillKind(PaintTarget::Fill, FillKind::Gradient)));
    let g = s.fill.paint.gradient().unwrap();
    assert_eq!(g.stops()[0].color, red);
    assert_eq!(g.stops().len(), 2);

    assert!(s.apply(&StyleEdit::FillKind(PaintTarget::Fill, FillKind::Solid)));
    assert_eq!(s.fill.paint, Paint::Solid(red));
    assert!(!s.apply(&StyleEdit::FillKind(PaintTarget::Fill, FillKind::Solid)));
}

#[test]
fn gradient_stop_edits() {
    let mut s = ElementStyleState::default();
    s.apply(&StyleEdit::Gradient(PaintTarget::Stroke, Gradient::default()));
    s.apply(&StyleEdit::GradientKind(PaintTarget::Stroke, GradientKind::Radial));
    s.apply(&StyleEdit::StopColor(PaintTarget::Stroke, 1, ColorValue::WHITE));
    s.apply(&StyleEdit::StopOpacity(PaintTarget::Stroke, 0, 500.0));
    let g = s.stroke.paint.gradient().unwrap();
    assert_eq!(g.kind, GradientKind::Radial);
    assert_eq!(g.stops()[1].color, ColorValue::WHITE);
    assert_eq!(g.stops()[0].opacity(), 100);
    assert_eq!(s.stroke.fill_kind(), FillKind::Gradient);
}

#[test]
fn stroke_geometry_edits_clamp_negative() {
    let mut s = ElementStyleState::default();
    s.apply(&StyleEdit::Thickness(-4.0));
    assert_eq!(s.stroke.thickness_px, 0.0);
    s.apply(&StyleEdit::Thickness(3.0));
    s.apply(&StyleEdit::DashLength(f64::NAN));
    s.apply(&StyleEdit::DashGap(6.0));
    s.apply(&StyleEdit::RoundCaps(true));
    assert_eq!(s.stroke.thickness_px, 3.0);
    assert_eq!(s.stroke.dash.length, 0.0);
    assert_eq!(s.stroke.dash.gap, 6.0);
    assert!(s.stroke.dash.round_caps);
    assert!(s.stroke.is_visible());
}

#[test]
fn with_edit_leaves_original_untouched() {
    let s = ElementStyleState::default();
    let next = s.with_edit(&StyleEdit::StrokeType(StrokeType::Dashed));
    assert_eq!(s.stroke.line, StrokeType::Solid);
    assert_eq!(next.stroke.line, StrokeType::Dashed);
}

#[test]
fn painted_width_doubles_off_center() {
    assert_eq!(StrokePosition::Outside.painted_width(2.0), 4.0);
    assert_eq!(StrokePosition::Inside.painted_width(2.0), 4.0);
    assert_eq!(StrokePosition::Center.painted_width(2.0), 2.0);
}

#[test]
fn enum_spellings() {
    assert_eq!(StrokeType::from_name("Dashed"), Some(StrokeType::Dashed));
    assert_eq!(StrokePosition::from_name("center"), Some(StrokePosition::Center));
    assert_eq!(FillKind::from_name("gradient"), Some(FillKind::Gradient));
    assert_eq!(FillKind::Gradient.as_str(), "gradient");
    assert!(StrokeType::from_name("dotted").is_none());
}
