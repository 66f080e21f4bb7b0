use super::*;

#[test]
fn names_map_to_timing_functions() {
    assert_eq!(Easing::from_name("Linear").timing_function(), "linear");
    assert_eq!(Easing::from_name("Smooth").timing_function(), "ease");
    assert_eq!(Easing::from_name("ease-in").timing_function(), "ease-in");
    assert_eq!(Easing::from_name("Ease Out").timing_function(), "ease-out");
    assert_eq!(Easing::from_name("EaseInOut").timing_function(), "ease-in-out");
    assert!(Easing::from_name("bounce").timing_function().starts_with("cubic-bezier("));
}

#[test]
fn unknown_names_default_to_linear() {
    assert_eq!(Easing::from_name("wobbly"), Easing::Linear);
    assert_eq!(Easing::from_name(""), Easing::Linear);
}

#[test]
fn attribute_spelling_round_trips() {
    for e in Easing::ALL {
        assert_eq!(Easing::from_name(e.as_str()), e);
    }
}

#[test]
fn curves_hit_endpoints() {
    for e in Easing::ALL {
        assert!(e.apply(0.0).abs() < 1e-6, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?}");
    }
}

#[test]
fn ease_in_starts_slow_and_ease_out_starts_fast() {
    assert!(Easing::EaseIn.apply(0.25) < 0.25);
    assert!(Easing::EaseOut.apply(0.25) > 0.25);
    let mid = Easing::EaseInOut.apply(0.5);
    assert!((mid - 0.5).abs() < 1e-4);
}

#[test]
fn bounce_overshoots() {
    let min = (1..100)
        .map(|i| Easing::Bounce.apply(f64::from(i) / 100.0))
        .fold(f64::INFINITY, f64::min);
    let max = (1..100)
        .map(|i| Easing::Bounce.apply(f64::from(i) / 100.0))
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(min < 0.0);
    assert!(max > 1.0);
}

#[test]
fn monotonic_curves_increase() {
    for e in [Easing::Smooth, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
        let mut prev = 0.0;
        for i in 1..=50 {
            let v = e.apply(f64::from(i) / 50.0);
            assert!(v + 1e-9 >= prev, "{e:?} at {i}");
            prev = v;
        }
    }
}
