//! Tuning values compiled from `config/gestures.toml` by the build script.

#[derive(Clone, Copy, Debug)]
pub struct ScreenLayout {
    pub screen_width: u16,
    pub screen_height: u16,
    pub map_width: u16,
    pub map_height: u16,
    pub status_split_x: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct VolumeScale {
    /// Touch row mapped to 0 %.
    pub y_for_min: u16,
    /// Touch row mapped to 100 %.
    pub y_for_max: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct ProjectionTarget {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct TouchConfig {
    pub sample_interval_ms: u64,
    pub liveness_timeout_ms: u64,
    pub tap_max_px: u16,
    pub swipe_min_px: u16,
    pub swipe_max_duration_ms: u64,
    pub double_tap_window_ms: u64,
    pub vertical_swipes: bool,
    pub layout: ScreenLayout,
    pub volume: VolumeScale,
    pub projection: ProjectionTarget,
}

#[derive(Clone, Copy, Debug)]
pub struct ButtonConfig {
    pub debounce_ms: u64,
    pub long_press_ms: u64,
    pub double_tap_window_ms: u64,
    pub active_low: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    pub touch: TouchConfig,
    pub button: ButtonConfig,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureConfig {
    &GESTURE_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_defaults_match_panel_geometry() {
        let config = active_config();
        assert_eq!(config.touch.layout.screen_height, 640);
        assert_eq!(config.touch.layout.map_height, 580);
        assert_eq!(config.touch.layout.status_split_x, 90);
        assert!(config.touch.tap_max_px < config.touch.swipe_min_px);
        assert!(config.touch.volume.y_for_max < config.touch.volume.y_for_min);
        assert!(config.button.debounce_ms < config.button.long_press_ms);
    }
}
