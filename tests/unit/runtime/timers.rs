use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn drain(q: &mut TimerQueue<&'static str>, until: Duration) -> Vec<&'static str> {
    let mut out = Vec::new();
    while let Some((_, e)) = q.pop_due(until) {
        out.push(e);
    }
    q.set_now(until);
    out
}

#[test]
fn fires_in_deadline_then_schedule_order() {
    let mut q = TimerQueue::new();
    q.schedule(ms(20), "b");
    q.schedule(ms(10), "a");
    q.schedule(ms(20), "c");
    q.schedule(ms(0), "tick");
    assert_eq!(drain(&mut q, ms(15)), vec!["tick", "a"]);
    assert_eq!(q.now(), ms(15));
    assert_eq!(drain(&mut q, ms(100)), vec!["b", "c"]);
    assert!(q.is_empty());
}

#[test]
fn cancelled_timers_never_fire() {
    let mut q = TimerQueue::new();
    let a = q.schedule(ms(5), "a");
    q.schedule(ms(6), "b");
    assert_eq!(q.cancel(a), Some("a"));
    assert_eq!(q.cancel(a), None);
    assert!(!q.is_pending(a));
    assert_eq!(q.next_deadline(), Some(ms(6)));
    assert_eq!(drain(&mut q, ms(10)), vec!["b"]);
}

#[test]
fn schedule_is_relative_to_now() {
    let mut q = TimerQueue::new();
    q.set_now(ms(100));
    q.schedule(ms(10), "x");
    assert_eq!(q.next_deadline(), Some(ms(110)));
    q.set_now(ms(50));
    assert_eq!(q.now(), ms(100));
}

#[test]
fn debouncer_rearm_replaces_pending_timer() {
    let mut q = TimerQueue::new();
    let mut d = Debouncer::new(ms(150));
    let first = d.arm(&mut q, "persist");
    q.set_now(ms(100));
    let second = d.arm(&mut q, "persist");
    assert!(!q.is_pending(first));
    assert_eq!(q.len(), 1);

    assert!(q.pop_due(ms(200)).is_none());
    let (id, _) = q.pop_due(ms(250)).unwrap();
    assert_eq!(id, second);
    assert!(!d.fired(first));
    assert!(d.fired(second));
    assert!(!d.is_armed());
}

#[test]
fn debouncer_flush_reports_pending_work() {
    let mut q = TimerQueue::new();
    let mut d = Debouncer::new(ms(150));
    assert!(!d.flush(&mut q));
    d.arm(&mut q, "persist");
    assert!(d.flush(&mut q));
    assert!(q.is_empty());
    assert!(!d.flush(&mut q));
}
