use rigcal_config::{CalType, Config, load_toml};
use rstest::rstest;

#[test]
fn defaults_validate() {
    let cfg = Config::default();
    cfg.validate().expect("defaults must be valid");
}

#[test]
fn empty_toml_gives_defaults() {
    let cfg = load_toml("").expect("empty config parses");
    assert_eq!(cfg.classifier.min_shake_count, 4);
    assert_eq!(cfg.session.default_type, CalType::Fast);
    assert!(cfg.session.calibrate_on_start);
    cfg.validate().expect("defaults must be valid");
}

#[test]
fn full_toml_round_trip() {
    let cfg = load_toml(
        r#"
        [classifier]
        min_shake_count = 6
        acceleration_ratio = 4.0
        shake_window_s = 3.0

        [session]
        default_type = "full"
        calibrate_on_start = false
        hold_to_trigger_s = 0.5

        [logging]
        level = "debug"
        "#,
    )
    .expect("config parses");

    assert_eq!(cfg.classifier.min_shake_count, 6);
    assert_eq!(cfg.classifier.acceleration_ratio, 4.0);
    // Untouched fields keep their defaults.
    assert_eq!(cfg.classifier.orientation_ratio, 2.0);
    assert_eq!(cfg.session.default_type, CalType::Full);
    assert!(!cfg.session.calibrate_on_start);
    assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
    cfg.validate().expect("config must be valid");
}

#[rstest]
#[case("[classifier]\nmin_shake_count = 0", "min_shake_count")]
#[case("[classifier]\nacceleration_ratio = 1.0", "acceleration_ratio")]
#[case("[classifier]\norientation_ratio = 0.5", "orientation_ratio")]
#[case("[classifier]\nacceleration_border = 0.0", "acceleration_border")]
#[case("[classifier]\nangle_border = 1.5", "angle_border")]
#[case("[classifier]\ngravity = -9.8", "gravity")]
#[case("[classifier]\nepsilon = 0.0", "epsilon")]
#[case("[classifier]\nshake_window_s = 0.0", "shake_window_s")]
#[case("[classifier]\narms_down_window_s = -1.0", "arms_down_window_s")]
#[case("[classifier]\nwarn_window_s = -0.1", "warn_window_s")]
#[case("[classifier]\nshake_window_s = 120.0", "unreasonably large")]
#[case("[session]\nhold_to_trigger_s = -0.1", "hold_to_trigger_s")]
#[case("[session]\nhold_to_trigger_s = 60.0", "unreasonably large")]
#[case("[session]\nhaptic_ms = 0", "haptic_ms")]
fn invalid_fields_are_rejected(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("config parses");
    let err = cfg.validate().expect_err("validation must fail");
    assert!(
        err.to_string().contains(needle),
        "error `{err}` should mention `{needle}`"
    );
}

#[test]
fn unknown_calibration_type_fails_to_parse() {
    assert!(load_toml("[session]\ndefault_type = \"turbo\"").is_err());
}
