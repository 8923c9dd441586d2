//! Console input: `T:<x>,<y>` injects a map tap in server coordinates, which
//! lets the radio pipeline be exercised without touching the panel.

use crate::{config::TouchConfig, touch::GestureEvent};

pub const SERIAL_LINE_MAX: usize = 64;

pub enum LineReadEvent<'a> {
    None,
    Complete(&'a [u8]),
    Overflow,
}

pub struct SerialLineReader {
    line_buf: [u8; SERIAL_LINE_MAX],
    line_len: usize,
    overflowed: bool,
}

impl Default for SerialLineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialLineReader {
    pub const fn new() -> Self {
        Self {
            line_buf: [0; SERIAL_LINE_MAX],
            line_len: 0,
            overflowed: false,
        }
    }

    pub fn push_byte(&mut self, byte: u8) -> LineReadEvent<'_> {
        if byte == b'\r' || byte == b'\n' {
            if self.overflowed {
                self.overflowed = false;
                return LineReadEvent::None;
            }
            if self.line_len == 0 {
                return LineReadEvent::None;
            }
            let complete_len = self.line_len;
            self.line_len = 0;
            return LineReadEvent::Complete(&self.line_buf[..complete_len]);
        }

        if self.overflowed {
            return LineReadEvent::None;
        }

        if self.line_len < self.line_buf.len() {
            self.line_buf[self.line_len] = byte;
            self.line_len += 1;
            return LineReadEvent::None;
        }

        self.line_len = 0;
        self.overflowed = true;
        LineReadEvent::Overflow
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedTap {
    pub server_x: i32,
    pub server_y: i32,
}

impl SimulatedTap {
    pub fn into_event(self) -> GestureEvent {
        GestureEvent::MapTap {
            server_x: self.server_x,
            server_y: self.server_y,
        }
    }
}

pub fn parse_serial_command(config: &TouchConfig, line: &[u8]) -> Option<SimulatedTap> {
    let line = core::str::from_utf8(line).ok()?.trim();
    let coords = line.strip_prefix("T:")?;
    let (x, y) = coords.split_once(',')?;
    let x: i32 = x.trim().parse().ok()?;
    let y: i32 = y.trim().parse().ok()?;

    Some(SimulatedTap {
        server_x: x.clamp(0, i32::from(config.projection.width)),
        server_y: y.clamp(0, i32::from(config.projection.height)),
    })
}
