use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn then_chains_segments_back_to_back() {
    let p = Program::new().then(1.0, 100).then(0.0, 300);
    assert_eq!(p.segments[1].start, 100);
    assert_eq!(p.end(), 400);
}

#[test]
fn sample_interpolates_linearly_and_clamps() {
    let p = Program::new().then(10.0, 100).then(0.0, 200);
    assert_eq!(p.sample(0.0, 0), 0.0);
    assert!(approx(p.sample(0.0, 50), 5.0));
    assert_eq!(p.sample(0.0, 100), 10.0);
    assert!(approx(p.sample(0.0, 200), 5.0));
    assert_eq!(p.sample(0.0, 300), 0.0);
    assert_eq!(p.sample(0.0, 10_000), 0.0);
}

#[test]
fn initial_value_holds_until_first_segment() {
    let p = Program::new().segment(500, 40.0, 1000);
    assert_eq!(p.sample(20.0, 0), 20.0);
    assert_eq!(p.sample(20.0, 499), 20.0);
    assert_eq!(p.sample(20.0, 500), 20.0);
    assert!(approx(p.sample(20.0, 1000), 30.0));
    assert_eq!(p.sample(20.0, 1500), 40.0);
}

#[test]
fn gaps_hold_previous_target() {
    let p = Program::new().segment(0, 1.0, 10).segment(50, 3.0, 10);
    assert_eq!(p.sample(0.0, 30), 1.0);
    assert!(approx(p.sample(0.0, 55), 2.0));
}

#[test]
fn zero_duration_segment_jumps() {
    let p = Program::new().segment(10, 7.0, 0);
    assert_eq!(p.sample(1.0, 9), 1.0);
    assert_eq!(p.sample(1.0, 10), 7.0);
}

#[test]
fn validate_rejects_bad_programs() {
    assert!(Program::new().validate().is_err());
    let overlapping = Program::new().segment(0, 1.0, 100).segment(50, 0.0, 100);
    assert!(overlapping.validate().is_err());
    let unsorted = Program::new().segment(100, 1.0, 10).segment(0, 0.0, 10);
    assert!(unsorted.validate().is_err());
    assert!(Program::new().then(f64::NAN, 10).validate().is_err());
}

#[test]
fn channel_is_idle_until_started() {
    let mut ch = AnimatedChannel::new(3.0);
    ch.set_program(Program::new().then(5.0, 100)).unwrap();
    assert!(!ch.is_started());
    assert_eq!(ch.sample(Millis(1_000)), 3.0);
    assert_eq!(ch.completes_at(), None);
    assert!(!ch.is_complete(Millis(u64::MAX)));
}

#[test]
fn channel_runs_relative_to_start_time() {
    let mut ch = AnimatedChannel::new(0.0);
    ch.set_program(Program::new().then(1.0, 200)).unwrap();
    let done = ch.start(Millis(1_000)).unwrap();
    assert_eq!(done, Millis(1_200));
    assert_eq!(ch.started_at(), Some(Millis(1_000)));
    assert_eq!(ch.sample(Millis(1_000)), 0.0);
    assert!(approx(ch.sample(Millis(1_100)), 0.5));
    assert!(!ch.is_complete(Millis(1_199)));
    assert!(ch.is_complete(Millis(1_200)));
    assert_eq!(ch.sample(Millis(5_000)), 1.0);
}

#[test]
fn started_channel_is_frozen() {
    let mut ch = AnimatedChannel::new(0.0);
    ch.set_program(Program::new().then(1.0, 10)).unwrap();
    ch.start(Millis(0)).unwrap();
    assert!(ch.start(Millis(5)).is_err());
    assert!(ch.set_program(Program::new().then(2.0, 10)).is_err());
    assert_eq!(ch.program().segments[0].target, 1.0);
}

#[test]
fn starting_without_program_fails() {
    let mut ch = AnimatedChannel::new(0.0);
    assert!(ch.start(Millis(0)).is_err());
    assert!(!ch.is_started());
}
