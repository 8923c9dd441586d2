use core::sync::atomic::{AtomicU32, Ordering};

use radiowall::{button::ButtonEvent, touch::GestureEvent};

static GESTURES_EMITTED: AtomicU32 = AtomicU32::new(0);
static DOUBLE_TAPS: AtomicU32 = AtomicU32::new(0);
static BUTTON_EVENTS: AtomicU32 = AtomicU32::new(0);
static SIMULATED_TAPS: AtomicU32 = AtomicU32::new(0);
static TOUCH_READ_ERRORS: AtomicU32 = AtomicU32::new(0);
static TOUCH_FLUSHES: AtomicU32 = AtomicU32::new(0);

#[derive(Clone, Copy)]
pub(crate) struct Snapshot {
    pub(crate) gestures_emitted: u32,
    pub(crate) double_taps: u32,
    pub(crate) button_events: u32,
    pub(crate) simulated_taps: u32,
    pub(crate) touch_read_errors: u32,
    pub(crate) touch_flushes: u32,
}

pub(crate) fn snapshot() -> Snapshot {
    Snapshot {
        gestures_emitted: GESTURES_EMITTED.load(Ordering::Relaxed),
        double_taps: DOUBLE_TAPS.load(Ordering::Relaxed),
        button_events: BUTTON_EVENTS.load(Ordering::Relaxed),
        simulated_taps: SIMULATED_TAPS.load(Ordering::Relaxed),
        touch_read_errors: TOUCH_READ_ERRORS.load(Ordering::Relaxed),
        touch_flushes: TOUCH_FLUSHES.load(Ordering::Relaxed),
    }
}

pub(crate) fn record_gesture(event: &GestureEvent) {
    GESTURES_EMITTED.fetch_add(1, Ordering::Relaxed);
    if matches!(event, GestureEvent::MapDoubleTap { .. }) {
        DOUBLE_TAPS.fetch_add(1, Ordering::Relaxed);
    }
    #[cfg(feature = "telemetry-defmt")]
    defmt::info!("telemetry gesture kind={=str}", event.label());
}

pub(crate) fn record_button(_event: ButtonEvent) {
    BUTTON_EVENTS.fetch_add(1, Ordering::Relaxed);
    #[cfg(feature = "telemetry-defmt")]
    defmt::info!("telemetry button kind={=str}", _event.label());
}

pub(crate) fn record_simulated_tap() {
    SIMULATED_TAPS.fetch_add(1, Ordering::Relaxed);
    #[cfg(feature = "telemetry-defmt")]
    defmt::debug!("telemetry simulated_tap");
}

pub(crate) fn record_touch_read_error(_reported: bool) {
    TOUCH_READ_ERRORS.fetch_add(1, Ordering::Relaxed);
    #[cfg(feature = "telemetry-defmt")]
    defmt::warn!("telemetry touch_read_error reported={=bool}", _reported);
}

pub(crate) fn record_touch_flush(_ok: bool) {
    TOUCH_FLUSHES.fetch_add(1, Ordering::Relaxed);
    #[cfg(feature = "telemetry-defmt")]
    defmt::debug!("telemetry touch_flush ok={=bool}", _ok);
}
