use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    projection::project_tap,
    types::{
        GestureEvent, GestureOutput, SampleReading, SwipeDirection, TouchPhase, TouchSample, Zone,
    },
    zone::{classify_zone, status_button, volume_percent},
};
use crate::{
    config::{active_config, TouchConfig},
    timing::elapsed_ms,
    ui::{UiMode, UiView, ViewBounds},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStateId {
    Idle,
    Tracking,
    /// Swallowing the rest of a touch that was consumed as a double tap.
    Absorbing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct GestureSession {
    start_x: u16,
    start_y: u16,
    current_x: u16,
    current_y: u16,
    start_ms: u64,
    last_sample_ms: u64,
    zone: Option<Zone>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingTap {
    x: u16,
    y: u16,
    armed_at_ms: u64,
}

#[derive(Clone, Copy, Debug)]
struct UiSnapshot {
    mode: UiMode,
    bounds: ViewBounds,
}

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Tick {
        now_ms: u64,
        sample: Option<TouchSample>,
        ui: UiSnapshot,
    },
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    events: [Option<GestureEvent>; 3],
    flush_requested: bool,
}

impl DispatchContext {
    fn emit(&mut self, event: GestureEvent) {
        if matches!(event, GestureEvent::MapDoubleTap { .. }) {
            self.flush_requested = true;
        }
        for slot in &mut self.events {
            if slot.is_none() {
                *slot = Some(event);
                return;
            }
        }
    }

    fn finish(self) -> GestureOutput {
        GestureOutput {
            events: self.events,
            flush_requested: self.flush_requested,
        }
    }
}

/// Single-touch gesture recognizer.
///
/// Feed it one [`TouchSample`] per poll (or `None` when nothing was read) and
/// the current UI view; it returns the semantic events completed on that tick.
pub struct GestureEngine {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(&active_config().touch)
    }
}

impl GestureEngine {
    pub fn new(config: &'static TouchConfig) -> Self {
        Self {
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    pub fn tick(
        &mut self,
        now_ms: u64,
        sample: Option<TouchSample>,
        ui: &impl UiView,
    ) -> GestureOutput {
        let mut context = DispatchContext::default();
        let event = GestureHsmEvent::Tick {
            now_ms,
            sample,
            ui: UiSnapshot {
                mode: ui.ui_mode(),
                bounds: ui.view_bounds(),
            },
        };
        self.machine.handle_with_context(&event, &mut context);
        context.finish()
    }

    pub fn state_id(&self) -> GestureStateId {
        self.machine.inner().state_id
    }

    /// True while a finger is (or may still be) on the panel.
    pub fn touch_in_progress(&self) -> bool {
        self.state_id() != GestureStateId::Idle
    }

    pub fn has_pending_tap(&self) -> bool {
        self.machine.inner().pending_tap.is_some()
    }

    pub fn active_zone(&self) -> Option<Zone> {
        match self.state_id() {
            GestureStateId::Tracking => self.machine.inner().session.zone,
            _ => None,
        }
    }
}

struct GestureHsm {
    config: &'static TouchConfig,
    state_id: GestureStateId,
    session: GestureSession,
    pending_tap: Option<PendingTap>,
}

impl GestureHsm {
    fn new(config: &'static TouchConfig) -> Self {
        Self {
            config,
            state_id: GestureStateId::Idle,
            session: GestureSession::default(),
            pending_tap: None,
        }
    }

    fn enter(&mut self, state_id: GestureStateId) -> Outcome<State> {
        self.state_id = state_id;
        match state_id {
            GestureStateId::Idle => Transition(State::idle()),
            GestureStateId::Tracking => Transition(State::tracking()),
            GestureStateId::Absorbing => Transition(State::absorbing()),
        }
    }

    fn pending_within_window(&self, now_ms: u64) -> bool {
        self.pending_tap.is_some_and(|pending| {
            elapsed_ms(now_ms, pending.armed_at_ms) < self.config.double_tap_window_ms
        })
    }

    /// Fires a held tap once its double-tap window has run out.
    fn resolve_expired_tap(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        ui: &UiSnapshot,
    ) {
        let Some(pending) = self.pending_tap else {
            return;
        };
        if elapsed_ms(now_ms, pending.armed_at_ms) < self.config.double_tap_window_ms {
            return;
        }
        self.pending_tap = None;
        let (server_x, server_y) = project_tap(self.config, &ui.bounds, pending.x, pending.y);
        context.emit(GestureEvent::MapTap { server_x, server_y });
    }

    /// Handles the first pressed sample of a touch.
    fn begin_touch(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        sample: &TouchSample,
        ui: &UiSnapshot,
    ) -> Outcome<State> {
        let zone = classify_zone(self.config, ui.mode, sample.y);

        if zone == Zone::Map
            && sample.phase == TouchPhase::Down
            && self.pending_within_window(now_ms)
        {
            self.pending_tap = None;
            context.emit(GestureEvent::MapDoubleTap {
                x: sample.x,
                y: sample.y,
            });
            self.session = GestureSession {
                last_sample_ms: now_ms,
                ..GestureSession::default()
            };
            return self.enter(GestureStateId::Absorbing);
        }

        self.session = GestureSession {
            start_x: sample.x,
            start_y: sample.y,
            current_x: sample.x,
            current_y: sample.y,
            start_ms: now_ms,
            last_sample_ms: now_ms,
            zone: Some(zone),
        };
        self.enter(GestureStateId::Tracking)
    }

    fn liveness_expired(&self, now_ms: u64) -> bool {
        elapsed_ms(now_ms, self.session.last_sample_ms) > self.config.liveness_timeout_ms
    }

    fn finish_gesture(&mut self, context: &mut DispatchContext, end_ms: u64) {
        let session = self.session;
        self.session = GestureSession::default();

        let Some(zone) = session.zone else {
            return;
        };
        match zone {
            Zone::StatusBar => {
                context.emit(GestureEvent::UiButton(status_button(
                    self.config,
                    session.start_x,
                )));
            }
            Zone::Menu => context.emit(GestureEvent::MenuTouch {
                x: session.start_x,
                y: session.start_y,
            }),
            Zone::Volume => context.emit(GestureEvent::VolumeChange(volume_percent(
                self.config,
                session.start_y,
            ))),
            Zone::Map => self.classify_map_gesture(context, &session, end_ms),
        }
    }

    fn classify_map_gesture(
        &mut self,
        context: &mut DispatchContext,
        session: &GestureSession,
        end_ms: u64,
    ) {
        let dx = i32::from(session.current_x) - i32::from(session.start_x);
        let dy = i32::from(session.current_y) - i32::from(session.start_y);
        let (adx, ady) = (dx.abs(), dy.abs());
        let swipe_min = i32::from(self.config.swipe_min_px);
        let tap_max = i32::from(self.config.tap_max_px);
        let quick = elapsed_ms(end_ms, session.start_ms) < self.config.swipe_max_duration_ms;

        if quick && adx > swipe_min && adx > ady {
            self.pending_tap = None;
            let direction = if dx > 0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            context.emit(GestureEvent::Swipe(direction));
            return;
        }

        if self.config.vertical_swipes && quick && ady > swipe_min && ady > adx {
            self.pending_tap = None;
            // Panel y grows downwards.
            let direction = if dy > 0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            };
            context.emit(GestureEvent::Swipe(direction));
            return;
        }

        if adx < tap_max && ady < tap_max {
            if self.pending_within_window(end_ms) {
                if let Some(first) = self.pending_tap.take() {
                    context.emit(GestureEvent::MapDoubleTap {
                        x: first.x,
                        y: first.y,
                    });
                }
            } else {
                self.pending_tap = Some(PendingTap {
                    x: session.current_x,
                    y: session.current_y,
                    armed_at_ms: end_ms,
                });
            }
            return;
        }

        // Controllers that miss the lift between two quick taps report one
        // slightly moved touch instead.
        if self.pending_within_window(end_ms) {
            self.pending_tap = None;
            context.emit(GestureEvent::MapDoubleTap {
                x: session.current_x,
                y: session.current_y,
            });
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Tick { now_ms, sample, ui } => {
                self.resolve_expired_tap(context, *now_ms, ui);
                match sample.map(|sample| (sample, sample.reading())) {
                    Some((sample, SampleReading::Pressed)) => {
                        self.begin_touch(context, *now_ms, &sample, ui)
                    }
                    _ => Handled,
                }
            }
        }
    }

    #[state]
    fn tracking(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Tick { now_ms, sample, ui } => {
                self.resolve_expired_tap(context, *now_ms, ui);
                let reading = sample.map(|sample| (sample, sample.reading()));

                if self.liveness_expired(*now_ms) {
                    // The controller went quiet: close the gesture at its last
                    // report. A fresh press in the same tick starts the next one.
                    let last_sample_ms = self.session.last_sample_ms;
                    self.finish_gesture(context, last_sample_ms);
                    // A tap armed in the past may already be due.
                    self.resolve_expired_tap(context, *now_ms, ui);
                    return match reading {
                        Some((sample, SampleReading::Pressed)) => {
                            self.begin_touch(context, *now_ms, &sample, ui)
                        }
                        _ => self.enter(GestureStateId::Idle),
                    };
                }

                match reading {
                    Some((sample, SampleReading::Pressed)) => {
                        self.session.current_x = sample.x;
                        self.session.current_y = sample.y;
                        self.session.last_sample_ms = *now_ms;
                        Handled
                    }
                    Some((_, SampleReading::Lifted { at })) => {
                        if let Some((x, y)) = at {
                            self.session.current_x = x;
                            self.session.current_y = y;
                        }
                        self.finish_gesture(context, *now_ms);
                        self.enter(GestureStateId::Idle)
                    }
                    Some((_, SampleReading::Ignored)) | None => Handled,
                }
            }
        }
    }

    #[state]
    fn absorbing(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Tick { now_ms, sample, ui } => {
                self.resolve_expired_tap(context, *now_ms, ui);
                let reading = sample.map(|sample| sample.reading());

                if self.liveness_expired(*now_ms) {
                    return match (sample, reading) {
                        (Some(sample), Some(SampleReading::Pressed)) => {
                            self.begin_touch(context, *now_ms, sample, ui)
                        }
                        _ => self.enter(GestureStateId::Idle),
                    };
                }

                match reading {
                    Some(SampleReading::Pressed) => {
                        self.session.last_sample_ms = *now_ms;
                        Handled
                    }
                    Some(SampleReading::Lifted { .. }) => self.enter(GestureStateId::Idle),
                    Some(SampleReading::Ignored) | None => Handled,
                }
            }
        }
    }
}
