//! Build-time compiler for `config/gestures.toml`.
//!
//! The firmware has no filesystem to read tuning values from, so the TOML file
//! is parsed and validated on the host and rendered into a Rust constant that
//! the library `include!`s from `OUT_DIR`.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GesturesFile {
    pub touch: TouchSection,
    pub button: ButtonSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TouchSection {
    pub sample_interval_ms: u64,
    pub liveness_timeout_ms: u64,
    pub tap_max_px: u16,
    pub swipe_min_px: u16,
    pub swipe_max_duration_ms: u64,
    pub double_tap_window_ms: u64,
    pub vertical_swipes: bool,
    pub layout: LayoutSection,
    pub volume: VolumeSection,
    pub projection: ProjectionSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    pub screen_width: u16,
    pub screen_height: u16,
    pub map_width: u16,
    pub map_height: u16,
    pub status_split_x: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeSection {
    pub y_for_min: u16,
    pub y_for_max: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionSection {
    pub target_width: u16,
    pub target_height: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonSection {
    pub debounce_ms: u64,
    pub long_press_ms: u64,
    pub double_tap_window_ms: u64,
    pub active_low: bool,
}

pub fn parse_gestures_str(source: &str) -> Result<GesturesFile, ConfigCompilerError> {
    toml::from_str(source).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn parse_gestures_file(path: &Path) -> Result<GesturesFile, ConfigCompilerError> {
    let source = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_gestures_str(&source)
}

pub fn validate_config(config: &GesturesFile) -> Result<(), ConfigCompilerError> {
    let touch = &config.touch;
    let button = &config.button;

    if touch.sample_interval_ms == 0
        || touch.liveness_timeout_ms == 0
        || touch.swipe_max_duration_ms == 0
        || touch.double_tap_window_ms == 0
    {
        return invalid("all touch durations must be > 0");
    }
    if touch.liveness_timeout_ms <= touch.sample_interval_ms {
        return invalid("touch.liveness_timeout_ms must be > touch.sample_interval_ms");
    }
    if touch.tap_max_px == 0 {
        return invalid("touch.tap_max_px must be > 0");
    }
    if touch.tap_max_px >= touch.swipe_min_px {
        return invalid("touch.tap_max_px must be < touch.swipe_min_px");
    }

    let layout = &touch.layout;
    if layout.map_width == 0 || layout.map_height == 0 {
        return invalid("touch.layout map dimensions must be > 0");
    }
    if layout.map_width > layout.screen_width {
        return invalid("touch.layout.map_width must be <= touch.layout.screen_width");
    }
    if layout.map_height > layout.screen_height {
        return invalid("touch.layout.map_height must be <= touch.layout.screen_height");
    }
    if layout.status_split_x > layout.screen_width {
        return invalid("touch.layout.status_split_x must be <= touch.layout.screen_width");
    }

    if touch.volume.y_for_max >= touch.volume.y_for_min {
        return invalid("touch.volume.y_for_max must be < touch.volume.y_for_min");
    }
    if touch.projection.target_width == 0 || touch.projection.target_height == 0 {
        return invalid("touch.projection target dimensions must be > 0");
    }

    if button.debounce_ms == 0 || button.long_press_ms == 0 || button.double_tap_window_ms == 0 {
        return invalid("all button durations must be > 0");
    }
    if button.debounce_ms >= button.long_press_ms {
        return invalid("button.debounce_ms must be < button.long_press_ms");
    }

    Ok(())
}

pub fn render_generated_config(config: &GesturesFile) -> String {
    let touch = &config.touch;
    let layout = &touch.layout;
    let volume = &touch.volume;
    let projection = &touch.projection;
    let button = &config.button;

    let mut out = String::new();
    out.push_str("// @generated by gesture_config_compiler from config/gestures.toml. Do not edit.\n");
    out.push_str("pub const GESTURE_CONFIG: GestureConfig = GestureConfig {\n");
    out.push_str("    touch: TouchConfig {\n");
    push_field(&mut out, 2, "sample_interval_ms", touch.sample_interval_ms);
    push_field(&mut out, 2, "liveness_timeout_ms", touch.liveness_timeout_ms);
    push_field(&mut out, 2, "tap_max_px", touch.tap_max_px);
    push_field(&mut out, 2, "swipe_min_px", touch.swipe_min_px);
    push_field(&mut out, 2, "swipe_max_duration_ms", touch.swipe_max_duration_ms);
    push_field(&mut out, 2, "double_tap_window_ms", touch.double_tap_window_ms);
    push_field(&mut out, 2, "vertical_swipes", touch.vertical_swipes);
    out.push_str("        layout: ScreenLayout {\n");
    push_field(&mut out, 3, "screen_width", layout.screen_width);
    push_field(&mut out, 3, "screen_height", layout.screen_height);
    push_field(&mut out, 3, "map_width", layout.map_width);
    push_field(&mut out, 3, "map_height", layout.map_height);
    push_field(&mut out, 3, "status_split_x", layout.status_split_x);
    out.push_str("        },\n");
    out.push_str("        volume: VolumeScale {\n");
    push_field(&mut out, 3, "y_for_min", volume.y_for_min);
    push_field(&mut out, 3, "y_for_max", volume.y_for_max);
    out.push_str("        },\n");
    out.push_str("        projection: ProjectionTarget {\n");
    push_field(&mut out, 3, "width", projection.target_width);
    push_field(&mut out, 3, "height", projection.target_height);
    out.push_str("        },\n");
    out.push_str("    },\n");
    out.push_str("    button: ButtonConfig {\n");
    push_field(&mut out, 2, "debounce_ms", button.debounce_ms);
    push_field(&mut out, 2, "long_press_ms", button.long_press_ms);
    push_field(&mut out, 2, "double_tap_window_ms", button.double_tap_window_ms);
    push_field(&mut out, 2, "active_low", button.active_low);
    out.push_str("    },\n");
    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_gestures_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}

fn push_field(out: &mut String, depth: usize, name: &str, value: impl fmt::Display) {
    for _ in 0..depth {
        out.push_str("    ");
    }
    out.push_str(name);
    out.push_str(": ");
    out.push_str(&value.to_string());
    out.push_str(",\n");
}

fn invalid(msg: &str) -> Result<(), ConfigCompilerError> {
    Err(ConfigCompilerError::Validation(msg.to_string()))
}
