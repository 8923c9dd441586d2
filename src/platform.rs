//! Hardware seams. The recognizers only see these traits; the `esp-hal`
//! adapters are compiled for the firmware build.

pub trait I2cOps {
    type Error;

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;
    fn probe(&mut self, addr: u8) -> Result<bool, Self::Error>;
}

/// One digital input line, read as a raw electrical level.
pub trait InputOps {
    fn is_high(&mut self) -> bool;
}

#[cfg(feature = "esp-hal-runtime")]
pub use hal::{HalI2c, HalInput};

#[cfg(feature = "esp-hal-runtime")]
mod hal {
    use esp_hal::{
        gpio::Input,
        i2c::master::{Error as I2cError, I2c},
        Blocking,
    };

    use super::{I2cOps, InputOps};

    pub struct HalI2c<'d> {
        bus: I2c<'d, Blocking>,
    }

    impl<'d> HalI2c<'d> {
        pub fn new(bus: I2c<'d, Blocking>) -> Self {
            Self { bus }
        }
    }

    impl I2cOps for HalI2c<'_> {
        type Error = I2cError;

        fn write_read(
            &mut self,
            addr: u8,
            bytes: &[u8],
            buffer: &mut [u8],
        ) -> Result<(), Self::Error> {
            self.bus.write_read(addr, bytes, buffer)
        }

        fn probe(&mut self, addr: u8) -> Result<bool, Self::Error> {
            match self.bus.write(addr, &[]) {
                Ok(()) => Ok(true),
                Err(I2cError::AcknowledgeCheckFailed(_)) => Ok(false),
                Err(err) => Err(err),
            }
        }
    }

    pub struct HalInput<'d> {
        pin: Input<'d>,
    }

    impl<'d> HalInput<'d> {
        pub fn new(pin: Input<'d>) -> Self {
            Self { pin }
        }
    }

    impl InputOps for HalInput<'_> {
        fn is_high(&mut self) -> bool {
            self.pin.is_high()
        }
    }
}
