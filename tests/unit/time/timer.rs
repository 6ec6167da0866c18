use super::*;

fn drain(q: &mut TimerQueue<&'static str>, now: u64) -> Vec<(u64, &'static str)> {
    let mut out = Vec::new();
    while let Some(f) = q.pop_due(Millis(now)) {
        out.push((f.due.0, f.event));
    }
    out
}

#[test]
fn once_fires_exactly_once_at_due_time() {
    let mut q = TimerQueue::new();
    q.once(Millis(100), "a");
    assert!(drain(&mut q, 99).is_empty());
    assert_eq!(drain(&mut q, 100), vec![(100, "a")]);
    assert!(drain(&mut q, 10_000).is_empty());
    assert!(q.is_empty());
}

#[test]
fn events_come_out_in_due_order_then_scheduling_order() {
    let mut q = TimerQueue::new();
    q.once(Millis(50), "late");
    q.once(Millis(10), "first");
    q.once(Millis(10), "second");
    assert_eq!(
        drain(&mut q, 100),
        vec![(10, "first"), (10, "second"), (50, "late")]
    );
}

#[test]
fn periodic_timer_is_fixed_rate_and_catches_up() {
    let mut q = TimerQueue::new();
    q.every(Millis(300), 300, "tick");
    assert!(drain(&mut q, 299).is_empty());
    assert_eq!(drain(&mut q, 300), vec![(300, "tick")]);
    // A late poll sees every missed occurrence at its own due time.
    assert_eq!(
        drain(&mut q, 1250),
        vec![(600, "tick"), (900, "tick"), (1200, "tick")]
    );
    assert_eq!(q.len(), 1);
    assert_eq!(q.next_due(), Some(Millis(1500)));
}

#[test]
fn periodic_interleaves_with_one_shots() {
    let mut q = TimerQueue::new();
    q.every(Millis(10), 10, "p");
    q.once(Millis(15), "o");
    assert_eq!(
        drain(&mut q, 30),
        vec![(10, "p"), (15, "o"), (20, "p"), (30, "p")]
    );
}

#[test]
fn cancel_is_immediate_and_idempotent() {
    let mut q = TimerQueue::new();
    let a = q.once(Millis(10), "a");
    let p = q.every(Millis(5), 5, "p");
    assert!(q.cancel(a));
    assert!(!q.cancel(a));
    assert_eq!(drain(&mut q, 12), vec![(5, "p"), (10, "p")]);
    assert!(q.cancel(p));
    assert!(!q.contains(p));
    assert!(drain(&mut q, 1_000).is_empty());
    assert_eq!(q.next_due(), None);
}

#[test]
fn cancel_all_leaves_nothing_pending() {
    let mut q = TimerQueue::new();
    for i in 0..20 {
        q.once(Millis(i * 7), "x");
    }
    q.every(Millis(3), 3, "y");
    assert_eq!(q.cancel_all(), 21);
    assert!(q.is_empty());
    assert!(drain(&mut q, u64::MAX).is_empty());
}

#[test]
fn zero_interval_does_not_spin() {
    let mut q = TimerQueue::new();
    q.every(Millis(0), 0, "z");
    assert_eq!(drain(&mut q, 2), vec![(0, "z"), (1, "z"), (2, "z")]);
}
