use crate::{config::TouchConfig, ui::UiMode};

use super::types::Zone;

pub fn classify_zone(config: &TouchConfig, mode: UiMode, y: u16) -> Zone {
    if y >= config.layout.map_height {
        return Zone::StatusBar;
    }
    match mode {
        UiMode::Menu | UiMode::Favorites | UiMode::Settings | UiMode::History => Zone::Menu,
        UiMode::Volume => Zone::Volume,
        UiMode::Map => Zone::Map,
    }
}

/// Linear map of the touch row onto 0..=100 %, clamped at both ends.
pub fn volume_percent(config: &TouchConfig, y: u16) -> u8 {
    let y_min = i32::from(config.volume.y_for_min);
    let y_max = i32::from(config.volume.y_for_max);
    let span = y_min - y_max;
    if span <= 0 {
        return 0;
    }
    let percent = (y_min - i32::from(y)) * 100 / span;
    percent.clamp(0, 100) as u8
}

pub fn status_button(config: &TouchConfig, x: u16) -> u8 {
    if x < config.layout.status_split_x {
        0
    } else {
        1
    }
}
