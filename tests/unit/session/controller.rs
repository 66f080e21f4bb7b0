use super::*;
use crate::animation::ease::Easing;
use crate::foundation::core::ElementId;

#[derive(Debug, PartialEq)]
struct Persist;

fn controller() -> (AnimationSettingsController, TimerQueue<Persist>, EffectRegistry) {
    (
        AnimationSettingsController::new(Duration::from_millis(150)),
        TimerQueue::new(),
        EffectRegistry::builtin(),
    )
}

#[test]
fn edits_apply_immediately_and_persist_is_debounced() {
    let (mut c, mut timers, reg) = controller();

    for v in [0.5, 1.0, 1.5] {
        assert!(c.edit(TriggerContext::Open, &AnimationEdit::Delay(v), &reg, &mut timers, Persist));
    }
    assert_eq!(c.settings(TriggerContext::Open).delay_s, 1.5);
    assert!(c.is_dirty());
    // Re-arming replaced the earlier timers.
    assert_eq!(timers.len(), 1);

    let (id, _) = timers.pop_due(Duration::from_millis(150)).unwrap();
    assert!(c.persist_fired(id));

    let mut el = Element::new(ElementId(1), "x");
    c.persist(&mut el);
    assert!(!c.is_dirty());
    assert_eq!(el.attr("data-animation-open-delay"), Some("1.5"));
}

#[test]
fn unchanged_edit_does_not_arm() {
    let (mut c, mut timers, reg) = controller();
    assert!(!c.edit(TriggerContext::Close, &AnimationEdit::Speed(1.0), &reg, &mut timers, Persist));
    assert!(timers.is_empty());
}

#[test]
fn choosing_effect_adopts_its_timing() {
    let (mut c, mut timers, reg) = controller();
    let fx = reg.lookup("zoom-in").unwrap().timing;
    c.edit(
        TriggerContext::Interact,
        &AnimationEdit::Effect("zoom-in".to_owned()),
        &reg,
        &mut timers,
        Persist,
    );
    let s = c.settings(TriggerContext::Interact);
    assert_eq!(s.effect, "zoom-in");
    assert_eq!(s.duration_s, fx.duration_s);
    assert_eq!(s.easing, fx.easing);
    assert!(c.settings(TriggerContext::Open).is_none());
}

#[test]
fn bundles_are_independent() {
    let (mut c, mut timers, reg) = controller();
    c.edit(TriggerContext::Open, &AnimationEdit::Easing(Easing::Bounce), &reg, &mut timers, Persist);
    assert_eq!(c.settings(TriggerContext::Open).easing, Easing::Bounce);
    assert_eq!(c.settings(TriggerContext::Close).easing, Easing::Linear);
}

#[test]
fn selectors_persist_trigger_and_action() {
    let (mut c, mut timers, _) = controller();
    assert!(c.set_context(TriggerContext::Interact, &mut timers, Persist));
    assert!(!c.set_context(TriggerContext::Interact, &mut timers, Persist));
    assert!(c.set_action(InteractAction::Always, &mut timers, Persist));

    let mut el = Element::new(ElementId(1), "x");
    c.persist(&mut el);
    assert_eq!(el.attr("data-animation-trigger"), Some("On Page"));
    assert_eq!(el.attr("data-animation-action"), Some("Always"));
}

#[test]
fn load_and_reset_drop_pending_persistence() {
    let (mut c, mut timers, reg) = controller();
    c.edit(TriggerContext::Open, &AnimationEdit::Delay(2.0), &reg, &mut timers, Persist);
    c.reset(AnimationBundle::default(), &mut timers);
    assert!(timers.is_empty());
    assert!(!c.is_dirty());
    assert_eq!(c.settings(TriggerContext::Open).delay_s, 0.0);

    let mut snap = AnimationSnapshot::default();
    snap.context = Some(TriggerContext::Close);
    snap.bundle.close.speed = 2.0;
    c.load(snap, &mut timers);
    assert_eq!(c.context(), TriggerContext::Close);
    assert_eq!(c.settings(TriggerContext::Close).speed, 2.0);
}
