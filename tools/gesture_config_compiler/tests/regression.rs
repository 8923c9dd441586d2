use std::path::PathBuf;

use gesture_config_compiler::{
    generate_from_path, parse_gestures_file, parse_gestures_str, render_generated_config,
    validate_config, ConfigCompilerError,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("missing tools dir")
        .parent()
        .expect("missing repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn repository_config_compiles() {
    let config = repo_root().join("config/gestures.toml");
    let rendered = generate_from_path(&config).expect("repository config should compile");

    assert!(rendered.starts_with("// @generated"));
    for needle in [
        "pub const GESTURE_CONFIG: GestureConfig = GestureConfig {",
        "sample_interval_ms: 20,",
        "liveness_timeout_ms: 200,",
        "tap_max_px: 15,",
        "swipe_min_px: 30,",
        "swipe_max_duration_ms: 800,",
        "map_height: 580,",
        "status_split_x: 90,",
        "y_for_min: 560,",
        "width: 1024,",
        "height: 600,",
        "long_press_ms: 800,",
        "active_low: true,",
    ] {
        assert!(
            rendered.contains(needle),
            "rendered output missing `{needle}`"
        );
    }
}

#[test]
fn repository_config_matches_default_fixture() {
    let repo = generate_from_path(&repo_root().join("config/gestures.toml"))
        .expect("repository config should compile");
    let fixture = generate_from_path(&fixture("valid_default.toml"))
        .expect("default fixture should compile");
    assert_eq!(
        repo, fixture,
        "config/gestures.toml drifted from tests/fixtures/valid_default.toml"
    );
}

#[test]
fn generation_is_deterministic_for_same_input() {
    let config = fixture("valid_default.toml");
    let first = generate_from_path(&config).expect("first generation failed");
    let second = generate_from_path(&config).expect("second generation failed");
    assert_eq!(first, second);
}

#[test]
fn horizontal_only_layout_renders_disabled_flags() {
    let path = fixture("valid_horizontal_only.toml");
    let gestures = parse_gestures_file(&path).expect("fixture should parse");
    validate_config(&gestures).expect("fixture should validate");
    let rendered = render_generated_config(&gestures);

    assert!(rendered.contains("vertical_swipes: false,"));
    assert!(rendered.contains("active_low: false,"));
}

#[test]
fn rendered_output_nests_sections_in_declaration_order() {
    let gestures =
        parse_gestures_file(&fixture("valid_default.toml")).expect("fixture should parse");
    let rendered = render_generated_config(&gestures);

    let order = [
        "touch: TouchConfig {",
        "layout: ScreenLayout {",
        "volume: VolumeScale {",
        "projection: ProjectionTarget {",
        "button: ButtonConfig {",
    ];
    let mut cursor = 0usize;
    for needle in order {
        let found = rendered[cursor..]
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` missing or out of order"));
        cursor += found + needle.len();
    }
}

#[test]
fn semantic_validation_rejects_inconsistent_values() {
    let cases = [
        (
            "invalid/tap_not_below_swipe.toml",
            "touch.tap_max_px must be < touch.swipe_min_px",
        ),
        (
            "invalid/volume_range_inverted.toml",
            "touch.volume.y_for_max must be < touch.volume.y_for_min",
        ),
        (
            "invalid/debounce_exceeds_long_press.toml",
            "button.debounce_ms must be < button.long_press_ms",
        ),
        (
            "invalid/zero_window.toml",
            "all touch durations must be > 0",
        ),
        (
            "invalid/map_taller_than_screen.toml",
            "touch.layout.map_height must be <= touch.layout.screen_height",
        ),
        (
            "invalid/zero_projection.toml",
            "touch.projection target dimensions must be > 0",
        ),
        (
            "invalid/status_split_outside_screen.toml",
            "touch.layout.status_split_x must be <= touch.layout.screen_width",
        ),
    ];

    for (name, expected) in cases {
        let err = generate_from_path(&fixture(name)).expect_err("fixture should be rejected");
        match err {
            ConfigCompilerError::Validation(msg) => {
                assert!(
                    msg.contains(expected),
                    "{name}: expected `{expected}`, got `{msg}`"
                );
            }
            other => panic!("{name}: expected validation error, got {other}"),
        }
    }
}

#[test]
fn unknown_keys_are_parse_errors() {
    let err = generate_from_path(&fixture("invalid/unknown_key.toml"))
        .expect_err("unknown key should be rejected");
    assert!(matches!(err, ConfigCompilerError::Parse(_)), "got {err}");
}

#[test]
fn missing_section_is_parse_error() {
    let err = parse_gestures_str("[touch]\nsample_interval_ms = 20\n")
        .expect_err("partial config should be rejected");
    assert!(matches!(err, ConfigCompilerError::Parse(_)), "got {err}");
}

#[test]
fn missing_file_is_io_error() {
    let err = generate_from_path(&fixture("does_not_exist.toml"))
        .expect_err("missing file should be rejected");
    match err {
        ConfigCompilerError::Io(msg) => assert!(msg.contains("does_not_exist.toml")),
        other => panic!("expected io error, got {other}"),
    }
}
