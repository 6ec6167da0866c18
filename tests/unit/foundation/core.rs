use super::*;

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(5).after(10), Millis(15));
    assert_eq!(Millis(u64::MAX).after(1), Millis(u64::MAX));
    assert_eq!(Millis(10).since(Millis(4)), 6);
    assert_eq!(Millis(4).since(Millis(10)), 0);
    assert_eq!(Millis(250).to_string(), "250ms");
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(100.0, 200.0).is_ok());
    assert!(Viewport::new(0.0, 200.0).is_err());
    assert!(Viewport::new(100.0, -1.0).is_err());
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    assert!(Viewport::new(10.0, f64::INFINITY).is_err());
}

#[test]
fn viewport_contains_is_half_open() {
    let vp = Viewport::new(100.0, 50.0).unwrap();
    assert!(vp.contains(Point::new(0.0, 0.0)));
    assert!(vp.contains(Point::new(99.9, 49.9)));
    assert!(!vp.contains(Point::new(100.0, 10.0)));
    assert!(!vp.contains(Point::new(10.0, 50.0)));
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
}
