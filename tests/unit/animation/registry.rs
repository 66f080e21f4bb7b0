use super::*;

#[test]
fn builtin_contains_none_and_core_effects() {
    let reg = EffectRegistry::builtin();
    for name in ["none", "fade-in", "slide-in-left", "zoom-in", "bounce", "pulse", "spin"] {
        assert!(reg.lookup(name).is_some(), "{name}");
    }
    assert!(reg.lookup(NONE_EFFECT).unwrap().keyframes.is_empty());
    assert!(reg.lookup("FADE-IN").is_some());
    assert!(reg.lookup("teleport").is_none());
}

#[test]
fn keyframes_are_ordered_and_bounded() {
    let reg = EffectRegistry::builtin();
    for name in reg.names() {
        let e = reg.lookup(name).unwrap();
        assert!(
            e.keyframes.windows(2).all(|w| w[0].offset <= w[1].offset),
            "{name}"
        );
        assert!(
            e.keyframes.iter().all(|k| (0.0..=1.0).contains(&k.offset)),
            "{name}"
        );
    }
}

#[test]
fn looping_effects_are_marked_infinite() {
    let reg = EffectRegistry::builtin();
    assert_eq!(reg.lookup("pulse").unwrap().timing.iterations, Iterations::Infinite);
    assert_eq!(reg.lookup("fade-in").unwrap().timing.iterations, Iterations::Count(1));
}

#[test]
fn register_replaces_by_name() {
    let mut reg = EffectRegistry::builtin();
    let before = reg.len();
    reg.register(Effect {
        name: "fade-in".to_owned(),
        label: "Custom Fade".to_owned(),
        keyframes: vec![],
        timing: DefaultTiming {
            duration_s: 2.0,
            easing: Easing::Linear,
            iterations: Iterations::Count(1),
        },
    });
    assert_eq!(reg.len(), before);
    assert_eq!(reg.lookup("fade-in").unwrap().label, "Custom Fade");

    let mut empty = EffectRegistry::empty();
    assert!(empty.is_empty());
    empty.register(reg.lookup("spin").unwrap().clone());
    assert_eq!(empty.names().collect::<Vec<_>>(), vec!["spin"]);
}

#[test]
fn native_properties_render() {
    let reg = EffectRegistry::builtin();
    let slide = reg.lookup("slide-in-left").unwrap();
    let first = slide.keyframes[0].to_native();
    assert_eq!(first.get("opacity").map(String::as_str), Some("0"));
    assert_eq!(
        first.get("transform").map(String::as_str),
        Some("translate(-100%, 0%) scale(1) rotate(0deg)")
    );
    let blur = reg.lookup("blur-in").unwrap().keyframes[0].to_native();
    assert_eq!(blur.get("filter").map(String::as_str), Some("blur(12px)"));
}

#[test]
fn motion_lerp_midpoint() {
    let m = Motion::lerp(&Motion::IDENTITY, &Motion::rotate(360.0), 0.5);
    assert_eq!(m.rotate_deg, 180.0);
    assert_eq!(m.scale, 1.0);
}
