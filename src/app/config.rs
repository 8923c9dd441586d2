use core::sync::atomic::AtomicBool;

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use radiowall::serial::SimulatedTap;

pub(crate) const UART_BAUD: u32 = 115_200;
pub(crate) const TOUCH_I2C_KHZ: u32 = 400;
pub(crate) const TOUCH_I2C_TIMEOUT_MS: u64 = 40;
pub(crate) const CONTROL_TICK_MS: u64 = 5;
pub(crate) const TELEMETRY_SUMMARY_INTERVAL_MS: u64 = 60_000;
pub(crate) const SERIAL_COMMAND_CAPACITY: usize = 4;

pub(crate) static SERIAL_COMMANDS: Channel<
    CriticalSectionRawMutex,
    SimulatedTap,
    SERIAL_COMMAND_CAPACITY,
> = Channel::new();
/// Set on a falling edge of the touch INT line, cleared once a read succeeds.
pub(crate) static TOUCH_IRQ_PENDING: AtomicBool = AtomicBool::new(false);
