//! AXS15231B capacitive controller on the T-Display-S3-Long.

use super::{
    poller::TouchController,
    types::{TouchPhase, TouchSample},
};
use crate::{config::ScreenLayout, platform::I2cOps};

pub const AXS15231B_ADDR: u8 = 0x3B;
pub const TOUCH_FRAME_LEN: usize = 8;
const READ_TOUCH_CMD: [u8; 11] = [
    0xB5, 0xAB, 0xA5, 0x5A, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00,
];

#[derive(Debug, PartialEq, Eq)]
pub enum TouchDriverError<E> {
    I2c(E),
    /// Frame decoded to a point outside the panel.
    Malformed,
}

/// Decodes one report. The controller's y axis runs bottom-up, so it is
/// flipped into portrait panel rows here.
pub fn decode_frame<E>(
    raw: &[u8; TOUCH_FRAME_LEN],
    layout: &ScreenLayout,
) -> Result<TouchSample, TouchDriverError<E>> {
    let finger_count = raw[1];
    if finger_count == 0 {
        return Ok(TouchSample::released());
    }

    let phase = match raw[2] >> 6 {
        0 => TouchPhase::Down,
        1 => TouchPhase::Up,
        2 => TouchPhase::Contact,
        _ => TouchPhase::None,
    };
    let raw_y = (u16::from(raw[2] & 0x0F) << 8) | u16::from(raw[3]);
    let x = (u16::from(raw[4] & 0x0F) << 8) | u16::from(raw[5]);

    if x >= layout.screen_width || raw_y > layout.screen_height {
        return Err(TouchDriverError::Malformed);
    }
    let y = (layout.screen_height - raw_y).min(layout.screen_height.saturating_sub(1));

    Ok(TouchSample {
        finger_count,
        phase,
        x,
        y,
    })
}

pub struct Axs15231bTouch<I2C> {
    i2c: I2C,
    layout: ScreenLayout,
}

impl<I2C> Axs15231bTouch<I2C>
where
    I2C: I2cOps,
{
    pub fn new(i2c: I2C, layout: ScreenLayout) -> Self {
        Self { i2c, layout }
    }

    pub fn probe(&mut self) -> Result<bool, TouchDriverError<I2C::Error>> {
        self.i2c
            .probe(AXS15231B_ADDR)
            .map_err(TouchDriverError::I2c)
    }

    pub fn read_raw(&mut self) -> Result<[u8; TOUCH_FRAME_LEN], TouchDriverError<I2C::Error>> {
        let mut raw = [0u8; TOUCH_FRAME_LEN];
        self.i2c
            .write_read(AXS15231B_ADDR, &READ_TOUCH_CMD, &mut raw)
            .map_err(TouchDriverError::I2c)?;
        Ok(raw)
    }
}

impl<I2C> TouchController for Axs15231bTouch<I2C>
where
    I2C: I2cOps,
{
    type Error = TouchDriverError<I2C::Error>;

    fn read_sample(&mut self) -> Result<TouchSample, Self::Error> {
        let raw = self.read_raw()?;
        decode_frame(&raw, &self.layout)
    }
}
