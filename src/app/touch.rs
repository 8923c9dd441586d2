use core::sync::atomic::Ordering;

use super::{config::TOUCH_IRQ_PENDING, types::TouchIrqPin};

#[embassy_executor::task]
pub(crate) async fn touch_irq_task(mut touch_irq: TouchIrqPin) {
    loop {
        touch_irq.wait_for_falling_edge().await;
        TOUCH_IRQ_PENDING.store(true, Ordering::Relaxed);
        // Re-arm on level return so held-low periods don't starve next edge.
        if touch_irq.is_low() {
            touch_irq.wait_for_rising_edge().await;
        }
    }
}
