use super::*;
use crate::animation::settings::AnimationEdit;
use crate::host::element::Document;

#[derive(Debug, PartialEq)]
enum Ev {
    Expire(PreviewHandle),
}

fn setup() -> (PreviewScheduler, Document, TimerQueue<Ev>, ElementId) {
    let mut doc = Document::new();
    let id = doc.insert(Element::new(ElementId(1), "Hello"));
    (
        PreviewScheduler::new(EffectRegistry::builtin()),
        doc,
        TimerQueue::new(),
        id,
    )
}

fn settings(duration_s: f64, speed: f64, delay_s: f64, easing: Easing) -> AnimationSettings {
    let mut s = AnimationSettings::default();
    s.apply(&AnimationEdit::Duration(duration_s));
    s.apply(&AnimationEdit::Speed(speed));
    s.apply(&AnimationEdit::Delay(delay_s));
    s.apply(&AnimationEdit::Easing(easing));
    s
}

fn running(doc: &Document, id: ElementId) -> Vec<PreviewHandle> {
    doc.get(id)
        .unwrap()
        .running_animations()
        .iter()
        .map(|a| a.handle)
        .collect()
}

#[test]
fn second_preview_cancels_the_first() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = AnimationSettings::default();

    let a = sched
        .preview(&mut doc, id, "fade-in", &s, &mut timers, Ev::Expire)
        .unwrap();
    let b = sched
        .preview(&mut doc, id, "zoom-in", &s, &mut timers, Ev::Expire)
        .unwrap();

    assert_ne!(a, b);
    assert!(!sched.is_live(a));
    assert!(sched.is_live(b));
    assert_eq!(sched.state(), PreviewState::Playing(b));
    assert_eq!(running(&doc, id), vec![b]);
    // Only B's deadline remains armed.
    assert_eq!(timers.len(), 1);
}

#[test]
fn timing_divides_duration_by_speed_and_maps_easing() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = settings(2.0, 2.0, 0.5, Easing::EaseOut);
    sched
        .preview(&mut doc, id, "fade-in", &s, &mut timers, Ev::Expire)
        .unwrap();

    let anim = &doc.get(id).unwrap().running_animations()[0];
    assert_eq!(anim.timing.duration_ms, 1000.0);
    assert_eq!(anim.timing.delay_ms, 500.0);
    assert_eq!(anim.timing.timing_function(), "ease-out");
    assert_eq!(anim.timing.fill, FillMode::Forwards);
    assert_eq!(
        timers.next_deadline(),
        Some(Duration::from_millis(1500) + DEFAULT_PREVIEW_EPSILON)
    );
}

#[test]
fn deadline_auto_cancels_the_live_preview() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = AnimationSettings::default();
    let h = sched
        .preview(&mut doc, id, "pulse", &s, &mut timers, Ev::Expire)
        .unwrap();

    assert!(timers.pop_due(Duration::from_millis(1000)).is_none());
    let (_, Ev::Expire(fired)) = timers.pop_due(Duration::from_millis(1050)).unwrap();
    assert_eq!(fired, h);
    assert!(sched.expire(&mut doc, fired));
    assert_eq!(sched.state(), PreviewState::Idle);
    assert!(running(&doc, id).is_empty());
    assert!(!sched.expire(&mut doc, fired));
}

#[test]
fn stale_expiry_does_not_cancel_newer_preview() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = AnimationSettings::default();
    let a = sched
        .preview(&mut doc, id, "fade-in", &s, &mut timers, Ev::Expire)
        .unwrap();
    let b = sched
        .preview(&mut doc, id, "fade-out", &s, &mut timers, Ev::Expire)
        .unwrap();
    assert!(!sched.expire(&mut doc, a));
    assert!(sched.is_live(b));
}

#[test]
fn unknown_and_none_effects_are_noops() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = AnimationSettings::default();
    assert!(
        sched
            .preview(&mut doc, id, "teleport", &s, &mut timers, Ev::Expire)
            .is_none()
    );
    assert!(
        sched
            .preview(&mut doc, id, "none", &s, &mut timers, Ev::Expire)
            .is_none()
    );
    assert!(timers.is_empty());
    assert_eq!(sched.state(), PreviewState::Idle);
}

#[test]
fn missing_target_is_a_noop() {
    let (mut sched, mut doc, mut timers, _) = setup();
    let s = AnimationSettings::default();
    assert!(
        sched
            .preview(&mut doc, ElementId(99), "fade-in", &s, &mut timers, Ev::Expire)
            .is_none()
    );
    assert!(timers.is_empty());
}

#[test]
fn sampling_follows_delay_easing_and_forward_fill() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = settings(1.0, 1.0, 0.2, Easing::Linear);
    sched
        .preview(&mut doc, id, "fade-in", &s, &mut timers, Ev::Expire)
        .unwrap();
    let anim = doc.get(id).unwrap().running_animations()[0].clone();

    assert!(anim.sample(Duration::from_millis(100)).is_none());
    let mid = anim.sample(Duration::from_millis(700)).unwrap();
    assert!((mid.opacity.unwrap() - 0.5).abs() < 1e-9);
    let held = anim.sample(Duration::from_millis(5000)).unwrap();
    assert_eq!(held.opacity, Some(1.0));
    assert_eq!(held.to_native().get("opacity").map(String::as_str), Some("1"));
}

#[test]
fn looping_effects_wrap_progress() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = settings(1.0, 1.0, 0.0, Easing::Linear);
    sched
        .preview(&mut doc, id, "spin", &s, &mut timers, Ev::Expire)
        .unwrap();
    let anim = doc.get(id).unwrap().running_animations()[0].clone();
    let a = anim.sample(Duration::from_millis(250)).unwrap();
    let b = anim.sample(Duration::from_millis(1250)).unwrap();
    assert!((a.motion.unwrap().rotate_deg - 90.0).abs() < 1e-6);
    assert!((b.motion.unwrap().rotate_deg - 90.0).abs() < 1e-6);
}

#[test]
fn multi_segment_keyframes_interpolate_within_segment() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = settings(1.0, 1.0, 0.0, Easing::Linear);
    sched
        .preview(&mut doc, id, "shake", &s, &mut timers, Ev::Expire)
        .unwrap();
    let anim = doc.get(id).unwrap().running_animations()[0].clone();
    // Between offsets 0.2 (-4%) and 0.4 (+4%).
    let f = anim.sample(Duration::from_millis(300)).unwrap();
    assert!(f.motion.unwrap().translate_x_pct.abs() < 1e-6);
}

#[test]
fn reset_strips_attributes_and_residue() {
    let (mut sched, mut doc, mut timers, id) = setup();
    let s = AnimationSettings::default();
    sched
        .preview(&mut doc, id, "fade-in", &s, &mut timers, Ev::Expire)
        .unwrap();

    let el = doc.element_mut(id).unwrap();
    el.set_attr("data-animation-open-type", "fade-in");
    el.set_attr("data-animation-trigger", "On Page");
    el.set_attr("data-fill-color", "#000000");
    el.set_attr("data-stroke-color", "#FFFFFF");
    el.set_attr("data-border-thickness", "2");
    el.set_attr("class", "headline");
    el.set_style("opacity", "0.4");
    el.set_style("transform", "scale(1.2)");
    el.set_style("filter", "blur(2px)");
    el.set_style("backdrop-filter", "blur(2px)");
    el.set_style("font-size", "20px");

    let bundle = sched.reset(el, &mut timers);
    assert!(bundle.all_none());

    let el = doc.get(id).unwrap();
    assert!(el.attr("data-animation-open-type").is_none());
    assert!(el.attr("data-animation-trigger").is_none());
    assert!(el.attr("data-fill-color").is_none());
    assert!(el.attr("data-stroke-color").is_none());
    assert_eq!(el.attr("data-border-thickness"), Some("2"));
    assert_eq!(el.attr("class"), Some("headline"));
    for prop in ["opacity", "transform", "filter", "backdrop-filter"] {
        assert!(el.style(prop).is_none(), "{prop}");
    }
    assert_eq!(el.style("font-size"), Some("20px"));
    assert!(el.running_animations().is_empty());
    assert_eq!(sched.state(), PreviewState::Idle);
    assert!(timers.is_empty());
}
