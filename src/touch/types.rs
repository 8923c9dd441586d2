#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Up,
    Contact,
    None,
}

impl TouchPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::Contact => "contact",
            Self::None => "none",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "down" => Some(Self::Down),
            "up" => Some(Self::Up),
            "contact" => Some(Self::Contact),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// One controller report in portrait panel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchSample {
    pub finger_count: u8,
    pub phase: TouchPhase,
    pub x: u16,
    pub y: u16,
}

impl TouchSample {
    pub const fn released() -> Self {
        Self {
            finger_count: 0,
            phase: TouchPhase::None,
            x: 0,
            y: 0,
        }
    }

    pub const fn down(x: u16, y: u16) -> Self {
        Self {
            finger_count: 1,
            phase: TouchPhase::Down,
            x,
            y,
        }
    }

    pub const fn contact(x: u16, y: u16) -> Self {
        Self {
            finger_count: 1,
            phase: TouchPhase::Contact,
            x,
            y,
        }
    }

    pub const fn up(x: u16, y: u16) -> Self {
        Self {
            finger_count: 1,
            phase: TouchPhase::Up,
            x,
            y,
        }
    }

    pub(crate) fn reading(&self) -> SampleReading {
        match (self.finger_count, self.phase) {
            (0, _) => SampleReading::Lifted { at: None },
            (1, TouchPhase::Up) => SampleReading::Lifted {
                at: Some((self.x, self.y)),
            },
            (1, TouchPhase::Down | TouchPhase::Contact) => SampleReading::Pressed,
            _ => SampleReading::Ignored,
        }
    }
}

/// How the recognizer treats a single sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SampleReading {
    Pressed,
    Lifted { at: Option<(u16, u16)> },
    /// Multi-touch or a phase-less report.
    Ignored,
}

/// Screen region that decides how a finished gesture is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Map,
    Menu,
    Volume,
    StatusBar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Wire code used by the radio server: ±1 horizontal, ±2 vertical.
    pub fn code(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
            Self::Up => -2,
            Self::Down => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "swipe_left",
            Self::Right => "swipe_right",
            Self::Up => "swipe_up",
            Self::Down => "swipe_down",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEvent {
    /// Single tap projected into the server's equirectangular map.
    MapTap { server_x: i32, server_y: i32 },
    /// Double tap in raw portrait coordinates.
    MapDoubleTap { x: u16, y: u16 },
    Swipe(SwipeDirection),
    UiButton(u8),
    MenuTouch { x: u16, y: u16 },
    VolumeChange(u8),
}

impl GestureEvent {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MapTap { .. } => "map_tap",
            Self::MapDoubleTap { .. } => "map_double_tap",
            Self::Swipe(direction) => direction.label(),
            Self::UiButton(_) => "ui_button",
            Self::MenuTouch { .. } => "menu_touch",
            Self::VolumeChange(_) => "volume",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureOutput {
    pub events: [Option<GestureEvent>; 3],
    /// Set when a double tap was emitted. The caller runs
    /// `TouchPoller::flush_pending_events` once it has handled the output.
    pub flush_requested: bool,
}

impl GestureOutput {
    pub fn is_empty(&self) -> bool {
        self.events.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = GestureEvent> + '_ {
        self.events.iter().flatten().copied()
    }
}
