pub(crate) mod config;
mod control;
mod serial;
mod telemetry;
mod touch;
pub(crate) mod types;

use esp_hal::{
    gpio::{Input, InputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c, SoftwareTimeout},
    time::{Duration as HalDuration, Rate},
    timer::timg::TimerGroup,
    uart::{Config as UartConfig, Uart},
};
use radiowall::{
    config::active_config,
    platform::{HalI2c, HalInput},
    touch::{frame::AXS15231B_ADDR, Axs15231bTouch},
};

use self::{
    config::{TOUCH_I2C_KHZ, TOUCH_I2C_TIMEOUT_MS, UART_BAUD},
    types::ControlContext,
};

pub(crate) fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let uart_cfg = UartConfig::default().with_baudrate(UART_BAUD);
    let uart = match Uart::new(peripherals.UART0, uart_cfg) {
        Ok(uart) => uart
            .with_rx(peripherals.GPIO44)
            .with_tx(peripherals.GPIO43)
            .into_async(),
        Err(_) => halt_forever(),
    };

    let i2c_cfg = I2cConfig::default()
        .with_frequency(Rate::from_khz(TOUCH_I2C_KHZ))
        .with_software_timeout(SoftwareTimeout::Transaction(HalDuration::from_millis(
            TOUCH_I2C_TIMEOUT_MS,
        )));
    let i2c = match I2c::new(peripherals.I2C0, i2c_cfg) {
        Ok(i2c) => i2c.with_sda(peripherals.GPIO15).with_scl(peripherals.GPIO10),
        Err(_) => halt_forever(),
    };
    // Reset is shared with the panel and owned by the display bring-up.
    let mut touch = Axs15231bTouch::new(HalI2c::new(i2c), active_config().touch.layout);
    match touch.probe() {
        Ok(true) => {
            esp_println::println!("touch: axs15231b ready addr=0x{:02x}", AXS15231B_ADDR)
        }
        Ok(false) => {
            esp_println::println!("touch: axs15231b no ack addr=0x{:02x}", AXS15231B_ADDR)
        }
        Err(err) => esp_println::println!("touch: probe failed err={:?}", err),
    }

    let touch_irq = Input::new(
        peripherals.GPIO11,
        InputConfig::default().with_pull(Pull::Up),
    );
    let button = HalInput::new(Input::new(
        peripherals.GPIO0,
        InputConfig::default().with_pull(Pull::Up),
    ));
    esp_println::println!("button: gpio=0 short=band_cycle long=stop double=next");

    let control_context = ControlContext { touch, button };

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(touch::touch_irq_task(touch_irq));
        spawner.must_spawn(serial::serial_task(uart));
        spawner.must_spawn(control::control_task(control_context));
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
