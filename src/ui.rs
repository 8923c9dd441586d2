//! Screen mode, visible map slice, volume and playback flags.
//!
//! The recognizers only read `UiView`. `UiState` is the concrete collaborator
//! the firmware owns; decoded events are routed into it with
//! [`UiState::apply_gesture`] and [`UiState::apply_button`].

use crate::{
    button::ButtonEvent,
    touch::{GestureEvent, SwipeDirection},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    Map,
    Menu,
    Favorites,
    Settings,
    History,
    Volume,
}

impl UiMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Menu => "menu",
            Self::Favorites => "favorites",
            Self::Settings => "settings",
            Self::History => "history",
            Self::Volume => "volume",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "map" => Some(Self::Map),
            "menu" => Some(Self::Menu),
            "favorites" => Some(Self::Favorites),
            "settings" => Some(Self::Settings),
            "history" => Some(Self::History),
            "volume" => Some(Self::Volume),
            _ => None,
        }
    }
}

/// Geographic window shown on the map, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub lon_min: f32,
    pub lon_max: f32,
    pub lat_min: f32,
    pub lat_max: f32,
}

pub trait UiView {
    fn ui_mode(&self) -> UiMode;
    fn view_bounds(&self) -> ViewBounds;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapSlice {
    pub name: &'static str,
    pub lon_min: f32,
    pub lon_max: f32,
}

pub const MAP_SLICES: [MapSlice; 4] = [
    MapSlice {
        name: "Americas",
        lon_min: -150.0,
        lon_max: -30.0,
    },
    MapSlice {
        name: "Europe/Africa",
        lon_min: -30.0,
        lon_max: 60.0,
    },
    MapSlice {
        name: "Asia",
        lon_min: 60.0,
        lon_max: 150.0,
    },
    // Crosses the antimeridian.
    MapSlice {
        name: "Pacific",
        lon_min: 150.0,
        lon_max: -150.0,
    },
];

const DEFAULT_SLICE_INDEX: usize = 1;
const DEFAULT_VOLUME: u8 = 50;
const LAT_MIN: f32 = -90.0;
const LAT_MAX: f32 = 90.0;

/// What a routed event changed, for logging by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiUpdate {
    Slice(&'static MapSlice),
    Mode(UiMode),
    Volume(u8),
    Playback { playing: bool },
    Unchanged,
}

#[derive(Clone, Debug)]
pub struct UiState {
    mode: UiMode,
    slice_index: usize,
    volume: u8,
    playing: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub const fn new() -> Self {
        Self {
            mode: UiMode::Map,
            slice_index: DEFAULT_SLICE_INDEX,
            volume: DEFAULT_VOLUME,
            playing: false,
        }
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: UiMode) {
        self.mode = mode;
    }

    pub fn current_slice(&self) -> &'static MapSlice {
        &MAP_SLICES[self.slice_index]
    }

    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    pub fn cycle_slice(&mut self) -> &'static MapSlice {
        self.slice_index = (self.slice_index + 1) % MAP_SLICES.len();
        self.current_slice()
    }

    pub fn cycle_slice_reverse(&mut self) -> &'static MapSlice {
        self.slice_index = (self.slice_index + MAP_SLICES.len() - 1) % MAP_SLICES.len();
        self.current_slice()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn set_volume(&mut self, percent: i32) {
        self.volume = percent.clamp(0, 100) as u8;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self) {
        self.playing = true;
    }

    pub fn set_stopped(&mut self) {
        self.playing = false;
    }

    pub fn apply_gesture(&mut self, event: &GestureEvent) -> UiUpdate {
        match *event {
            GestureEvent::Swipe(SwipeDirection::Right) => UiUpdate::Slice(self.cycle_slice()),
            GestureEvent::Swipe(SwipeDirection::Left) => {
                UiUpdate::Slice(self.cycle_slice_reverse())
            }
            GestureEvent::UiButton(0) => self.toggle_mode(UiMode::Menu),
            GestureEvent::UiButton(_) => self.toggle_mode(UiMode::Volume),
            GestureEvent::VolumeChange(percent) => {
                self.set_volume(i32::from(percent));
                UiUpdate::Volume(self.volume)
            }
            GestureEvent::MenuTouch { .. } => {
                self.mode = UiMode::Map;
                UiUpdate::Mode(UiMode::Map)
            }
            // Vertical pans, station lookup and zoom belong to collaborators
            // outside this crate.
            GestureEvent::Swipe(_)
            | GestureEvent::MapTap { .. }
            | GestureEvent::MapDoubleTap { .. } => UiUpdate::Unchanged,
        }
    }

    pub fn apply_button(&mut self, event: ButtonEvent) -> UiUpdate {
        match event {
            ButtonEvent::BandCycle => UiUpdate::Slice(self.cycle_slice()),
            ButtonEvent::Stop => {
                self.set_stopped();
                UiUpdate::Playback { playing: false }
            }
            ButtonEvent::Next => UiUpdate::Unchanged,
        }
    }

    fn toggle_mode(&mut self, target: UiMode) -> UiUpdate {
        self.mode = if self.mode == target {
            UiMode::Map
        } else {
            target
        };
        UiUpdate::Mode(self.mode)
    }
}

impl UiView for UiState {
    fn ui_mode(&self) -> UiMode {
        self.mode
    }

    fn view_bounds(&self) -> ViewBounds {
        let slice = self.current_slice();
        ViewBounds {
            lon_min: slice.lon_min,
            lon_max: slice.lon_max,
            lat_min: LAT_MIN,
            lat_max: LAT_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_europe_africa_map() {
        let ui = UiState::new();
        assert_eq!(ui.mode(), UiMode::Map);
        assert_eq!(ui.current_slice().name, "Europe/Africa");
        assert_eq!(ui.volume(), 50);
        assert!(!ui.is_playing());
    }

    #[test]
    fn slices_cycle_in_both_directions() {
        let mut ui = UiState::new();
        assert_eq!(ui.cycle_slice().name, "Asia");
        assert_eq!(ui.cycle_slice().name, "Pacific");
        assert_eq!(ui.cycle_slice().name, "Americas");
        assert_eq!(ui.cycle_slice_reverse().name, "Pacific");
        assert_eq!(ui.cycle_slice_reverse().name, "Asia");
    }

    #[test]
    fn view_bounds_follow_current_slice() {
        let mut ui = UiState::new();
        ui.cycle_slice();
        ui.cycle_slice();
        let bounds = ui.view_bounds();
        assert_eq!(bounds.lon_min, 150.0);
        assert_eq!(bounds.lon_max, -150.0);
        assert_eq!(bounds.lat_min, -90.0);
        assert_eq!(bounds.lat_max, 90.0);
    }

    #[test]
    fn volume_is_clamped() {
        let mut ui = UiState::new();
        ui.set_volume(140);
        assert_eq!(ui.volume(), 100);
        ui.set_volume(-3);
        assert_eq!(ui.volume(), 0);
    }

    #[test]
    fn status_buttons_toggle_their_screens() {
        let mut ui = UiState::new();

        assert_eq!(
            ui.apply_gesture(&GestureEvent::UiButton(0)),
            UiUpdate::Mode(UiMode::Menu)
        );
        assert_eq!(
            ui.apply_gesture(&GestureEvent::UiButton(0)),
            UiUpdate::Mode(UiMode::Map)
        );
        assert_eq!(
            ui.apply_gesture(&GestureEvent::UiButton(1)),
            UiUpdate::Mode(UiMode::Volume)
        );
        assert_eq!(
            ui.apply_gesture(&GestureEvent::UiButton(0)),
            UiUpdate::Mode(UiMode::Menu)
        );
    }

    #[test]
    fn horizontal_swipes_move_between_slices() {
        let mut ui = UiState::new();

        ui.apply_gesture(&GestureEvent::Swipe(SwipeDirection::Right));
        assert_eq!(ui.slice_index(), 2);
        ui.apply_gesture(&GestureEvent::Swipe(SwipeDirection::Left));
        ui.apply_gesture(&GestureEvent::Swipe(SwipeDirection::Left));
        assert_eq!(ui.slice_index(), 0);
        assert_eq!(
            ui.apply_gesture(&GestureEvent::Swipe(SwipeDirection::Up)),
            UiUpdate::Unchanged
        );
        assert_eq!(ui.slice_index(), 0);
    }

    #[test]
    fn menu_touch_and_volume_change_are_applied() {
        let mut ui = UiState::new();
        ui.set_mode(UiMode::Volume);

        assert_eq!(
            ui.apply_gesture(&GestureEvent::VolumeChange(72)),
            UiUpdate::Volume(72)
        );
        ui.set_mode(UiMode::Favorites);
        ui.apply_gesture(&GestureEvent::MenuTouch { x: 40, y: 200 });
        assert_eq!(ui.mode(), UiMode::Map);
    }

    #[test]
    fn button_events_route_to_slice_and_playback() {
        let mut ui = UiState::new();
        ui.set_playing();

        assert_eq!(
            ui.apply_button(ButtonEvent::BandCycle),
            UiUpdate::Slice(&MAP_SLICES[2])
        );
        assert_eq!(ui.apply_button(ButtonEvent::Next), UiUpdate::Unchanged);
        assert!(ui.is_playing());
        assert_eq!(
            ui.apply_button(ButtonEvent::Stop),
            UiUpdate::Playback { playing: false }
        );
        assert!(!ui.is_playing());
    }

    #[test]
    fn mode_labels_round_trip() {
        for mode in [
            UiMode::Map,
            UiMode::Menu,
            UiMode::Favorites,
            UiMode::Settings,
            UiMode::History,
            UiMode::Volume,
        ] {
            assert_eq!(UiMode::from_label(mode.label()), Some(mode));
        }
        assert_eq!(UiMode::from_label("zoom"), None);
    }
}
