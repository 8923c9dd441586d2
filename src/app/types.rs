use esp_hal::{gpio::Input, uart::Uart, Async};
use radiowall::{
    platform::{HalI2c, HalInput},
    touch::Axs15231bTouch,
};

pub(crate) type SerialUart = Uart<'static, Async>;
pub(crate) type TouchIrqPin = Input<'static>;
pub(crate) type TouchBus = Axs15231bTouch<HalI2c<'static>>;

pub(crate) struct ControlContext {
    pub(crate) touch: TouchBus,
    pub(crate) button: HalInput<'static>,
}
