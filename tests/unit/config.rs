use super::*;

#[test]
fn defaults_are_valid_and_match_stock_cadence() {
    let cfg = EngineConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.particles.interval_ms, 300);
    assert_eq!(cfg.sparks.interval_ms, 1_500);
    assert_eq!(cfg.particles.lifetime_bounds(), (8_500, 12_500));
    assert_eq!(cfg.sparks.lifetime_bounds(), (1_700, 5_200));
}

#[test]
fn empty_json_is_the_default_config() {
    let cfg = EngineConfig::from_json("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = EngineConfig::from_json(
        r#"{
            "viewport": { "width": 800, "height": 600 },
            "sparks": { "interval_ms": 500, "band": 0.5 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.viewport.width, 800.0);
    assert_eq!(cfg.sparks.interval_ms, 500);
    assert_eq!(cfg.sparks.band, 0.5);
    assert_eq!(cfg.sparks.fade_in_ms, 200);
    assert_eq!(cfg.particles, ParticleConfig::default());
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = [
        r#"{ "particles": { "interval_ms": 0 } }"#,
        r#"{ "particles": { "duration_ms": { "min": 12000, "max": 8000 } } }"#,
        r#"{ "particles": { "duration_ms": { "min": 400, "max": 8000 } } }"#,
        r#"{ "particles": { "peak_opacity": { "min": 0.5, "max": 1.5 } } }"#,
        r#"{ "sparks": { "start_delay_ms": { "min": 5, "max": 5 } } }"#,
        r#"{ "sparks": { "band": 0.0 } }"#,
        r#"{ "sparks": { "peak_opacity": 2.0 } }"#,
        r#"{ "viewport": { "width": 0, "height": 10 } }"#,
    ];
    for json in bad {
        let err = EngineConfig::from_json(json).unwrap_err();
        assert!(matches!(err, FxError::Config(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EngineConfig::from_json("{ nope").unwrap_err();
    assert!(matches!(err, FxError::Serde(_)));
}

#[test]
fn from_path_reads_json_files() {
    let dir = std::path::PathBuf::from("target").join("config_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fx.json");
    std::fs::write(&path, r#"{ "particles": { "interval_ms": 250 } }"#).unwrap();
    let cfg = EngineConfig::from_path(&path).unwrap();
    assert_eq!(cfg.particles.interval_ms, 250);

    let missing = EngineConfig::from_path(dir.join("missing.json")).unwrap_err();
    assert!(matches!(missing, FxError::Io(_)));
}

#[test]
fn config_round_trips_through_json() {
    let cfg = EngineConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(EngineConfig::from_json(&json).unwrap(), cfg);
}

#[test]
fn lifetime_bounds_saturate_on_huge_durations() {
    let mut cfg = EngineConfig::default();
    cfg.particles.duration_ms = Span::new(1_000, u64::MAX);
    cfg.sparks.start_delay_ms = Span::new(0, u64::MAX);
    cfg.validate().unwrap();
    assert_eq!(cfg.particles.lifetime_bounds(), (1_500, u64::MAX));
    assert_eq!(cfg.sparks.lifetime_bounds(), (1_700, u64::MAX));
}

#[test]
fn spans_wider_than_f64_are_rejected() {
    let mut cfg = EngineConfig::default();
    cfg.particles.drift_x = Span::new(-f64::MAX, f64::MAX);
    assert!(matches!(cfg.validate(), Err(FxError::Config(_))));

    let mut cfg = EngineConfig::default();
    cfg.sparks.lift = Span::new(-f64::MAX, f64::MAX);
    assert!(matches!(cfg.validate(), Err(FxError::Config(_))));

    let mut cfg = EngineConfig::default();
    cfg.particles.drift_x = Span::new(-1e300, 1e300);
    cfg.validate().unwrap();
}
