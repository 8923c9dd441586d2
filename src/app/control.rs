use core::sync::atomic::Ordering;

use embassy_time::{Duration, Instant, Ticker};
use radiowall::{
    button::{ButtonDecoder, ButtonEvent},
    config::active_config,
    timing::elapsed_ms,
    touch::{GestureEngine, GestureEvent, PollOutcome, TouchPoller, TouchSample},
    ui::{UiState, UiUpdate},
};

use super::{
    config::{CONTROL_TICK_MS, SERIAL_COMMANDS, TELEMETRY_SUMMARY_INTERVAL_MS, TOUCH_IRQ_PENDING},
    telemetry,
    types::{ControlContext, TouchBus},
};

/// The only reader of the touch bus and the button pin. Touch and button
/// are serviced back to back on every tick, never concurrently.
#[embassy_executor::task]
pub(crate) async fn control_task(mut context: ControlContext) {
    let config = active_config();
    let mut engine = GestureEngine::new(&config.touch);
    let mut poller = TouchPoller::from_config(&config.touch);
    let mut button = ButtonDecoder::new(&config.button);
    let mut ui = UiState::new();
    let mut last_summary_ms = 0u64;
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_TICK_MS));

    loop {
        ticker.next().await;
        let now_ms = Instant::now().as_millis();

        while let Ok(tap) = SERIAL_COMMANDS.try_receive() {
            telemetry::record_simulated_tap();
            dispatch_gesture(now_ms, &mut ui, &tap.into_event());
        }

        let sample = read_touch(now_ms, &engine, &mut poller, &mut context.touch);
        let output = engine.tick(now_ms, sample, &ui);
        for event in output.iter() {
            dispatch_gesture(now_ms, &mut ui, &event);
        }
        if output.flush_requested {
            // Drop whatever the controller queued while the double tap was handled.
            match poller.flush_pending_events(&mut context.touch) {
                Ok(()) => telemetry::record_touch_flush(true),
                Err(failure) => {
                    telemetry::record_touch_flush(false);
                    if failure.report {
                        esp_println::println!("touch: flush failed err={:?}", failure.error);
                    }
                }
            }
        }

        for event in button.poll(now_ms, &mut context.button).iter() {
            dispatch_button(now_ms, &mut ui, event);
        }

        if elapsed_ms(now_ms, last_summary_ms) >= TELEMETRY_SUMMARY_INTERVAL_MS {
            last_summary_ms = now_ms;
            log_summary();
        }
    }
}

fn read_touch(
    now_ms: u64,
    engine: &GestureEngine,
    poller: &mut TouchPoller,
    touch: &mut TouchBus,
) -> Option<TouchSample> {
    if !TOUCH_IRQ_PENDING.load(Ordering::Relaxed) && !engine.touch_in_progress() {
        return None;
    }

    match poller.poll(now_ms, touch) {
        PollOutcome::Throttled => None,
        PollOutcome::Sample(sample) => {
            TOUCH_IRQ_PENDING.store(false, Ordering::Relaxed);
            Some(sample)
        }
        PollOutcome::ReadFailed { error, report } => {
            telemetry::record_touch_read_error(report);
            if report {
                esp_println::println!("touch: read error err={:?}", error);
            }
            None
        }
    }
}

fn dispatch_gesture(now_ms: u64, ui: &mut UiState, event: &GestureEvent) {
    telemetry::record_gesture(event);
    match *event {
        GestureEvent::MapTap { server_x, server_y } => {
            esp_println::println!(
                "touch: map_tap ms={} server_x={} server_y={}",
                now_ms,
                server_x,
                server_y
            );
            ui.set_playing();
        }
        GestureEvent::MapDoubleTap { x, y } => {
            esp_println::println!("touch: map_double_tap ms={} x={} y={}", now_ms, x, y);
        }
        GestureEvent::Swipe(direction) => {
            esp_println::println!(
                "touch: swipe ms={} dir={} code={}",
                now_ms,
                direction.label(),
                direction.code()
            );
        }
        GestureEvent::UiButton(id) => {
            esp_println::println!("touch: ui_button ms={} id={}", now_ms, id);
        }
        GestureEvent::MenuTouch { x, y } => {
            esp_println::println!("touch: menu_touch ms={} x={} y={}", now_ms, x, y);
        }
        GestureEvent::VolumeChange(percent) => {
            esp_println::println!("touch: volume ms={} percent={}", now_ms, percent);
        }
    }
    log_ui_update(ui.apply_gesture(event));
}

fn dispatch_button(now_ms: u64, ui: &mut UiState, event: ButtonEvent) {
    telemetry::record_button(event);
    esp_println::println!("button: {} ms={}", event.label(), now_ms);
    log_ui_update(ui.apply_button(event));
}

fn log_ui_update(update: UiUpdate) {
    match update {
        UiUpdate::Slice(slice) => esp_println::println!(
            "ui: slice={} lon_min={} lon_max={}",
            slice.name,
            slice.lon_min,
            slice.lon_max
        ),
        UiUpdate::Mode(mode) => esp_println::println!("ui: mode={}", mode.label()),
        UiUpdate::Volume(percent) => esp_println::println!("ui: volume={}", percent),
        UiUpdate::Playback { playing } => esp_println::println!("ui: playing={}", playing),
        UiUpdate::Unchanged => {}
    }
}

fn log_summary() {
    let snapshot = telemetry::snapshot();
    esp_println::println!(
        "telemetry: gestures={} double_taps={} buttons={} simulated_taps={} read_errors={} flushes={}",
        snapshot.gestures_emitted,
        snapshot.double_taps,
        snapshot.button_events,
        snapshot.simulated_taps,
        snapshot.touch_read_errors,
        snapshot.touch_flushes
    );
}
