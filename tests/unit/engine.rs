use super::*;
use crate::time::clock::ManualClock;

fn engine() -> (ManualClock, Engine<ManualClock>) {
    let clock = ManualClock::new();
    let engine = Engine::seeded(EngineConfig::default(), clock.clone(), 42).unwrap();
    (clock, engine)
}

#[test]
fn new_rejects_invalid_config() {
    let mut cfg = EngineConfig::default();
    cfg.particles.interval_ms = 0;
    assert!(Engine::seeded(cfg, ManualClock::new(), 1).is_err());
}

#[test]
fn activate_arms_exactly_two_triggers() {
    let (_clock, mut e) = engine();
    assert_eq!(e.pending_timers(), 0);
    e.activate();
    e.activate();
    assert!(e.is_active());
    assert_eq!(e.pending_timers(), 2);
    assert!(e.particles.is_running());
    assert!(e.sparks.is_running());
}

#[test]
fn stale_epoch_events_are_ignored() {
    let (clock, mut e) = engine();
    e.activate();
    clock.set(Millis(300));
    let report = e.tick().unwrap();
    assert_eq!(report.spawned.len(), 1);
    let id = report.spawned[0];

    // Simulate a retirement scheduled by an earlier mount reaching the queue.
    e.timers.once(
        Millis(300),
        TimerEvent::Retire {
            id,
            epoch: e.epoch + 7,
        },
    );
    let report = e.tick().unwrap();
    assert!(report.retired.is_empty());
    assert!(e.registry.contains(id));
}

#[test]
fn events_for_unknown_entities_are_harmless() {
    let (_clock, mut e) = engine();
    e.activate();
    let epoch = e.epoch;
    let timer = e.timers.once(Millis(0), TimerEvent::Spawn(EntityKind::Spark));
    e.timers.cancel(timer);

    let mut report = TickReport::default();
    for event in [
        TimerEvent::Retire {
            id: EntityId(999),
            epoch,
        },
        TimerEvent::Start {
            id: EntityId(999),
            epoch,
        },
    ] {
        let fired = Fired {
            id: timer,
            due: Millis(0),
            event,
        };
        e.dispatch(fired, &mut report).unwrap();
    }
    assert!(report.is_empty());
    assert!(e.registry.is_empty());
}

#[test]
fn deactivate_bumps_epoch_and_drops_everything() {
    let (clock, mut e) = engine();
    e.activate();
    clock.set(Millis(5_000));
    e.tick().unwrap();
    assert!(!e.registry.is_empty());
    assert!(e.pending_timers() > 2);

    e.deactivate();
    assert_eq!(e.epoch(), 1);
    assert!(e.registry.is_empty());
    assert!(e.timers.is_empty());
    assert!(!e.particles.is_running());
    assert!(!e.sparks.is_running());

    e.deactivate();
    assert_eq!(e.epoch(), 1);
}

#[test]
fn ids_keep_increasing_across_mounts() {
    let (clock, mut e) = engine();
    e.activate();
    clock.set(Millis(600));
    let first = e.tick().unwrap().spawned;
    e.deactivate();
    e.activate();
    clock.set(Millis(900));
    let second = e.tick().unwrap().spawned;
    assert_eq!(second.len(), 1);
    assert!(first.iter().all(|a| second[0] > *a));
}

#[test]
fn failed_spark_build_schedules_nothing() {
    let (clock, mut e) = engine();
    // Longer than any sampled duration, so the spark timeline cannot be built.
    e.config.sparks.fade_in_ms = 5_000;
    e.activate();
    clock.set(Millis(1_500));
    assert!(e.tick().is_err());

    assert_eq!(e.population().sparks, 0);
    // Two spawner timers plus one retirement per particle; no orphaned start.
    assert_eq!(e.pending_timers(), 2 + e.population().particles);
}
