use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::{
    config::{active_config, ButtonConfig},
    platform::InputOps,
    timing::{elapsed_ms, LevelDebouncer},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Short press: move to the next map region.
    BandCycle,
    /// Long press: stop playback.
    Stop,
    /// Double tap: skip to the next station.
    Next,
}

impl ButtonEvent {
    pub fn label(self) -> &'static str {
        match self {
            Self::BandCycle => "band_cycle",
            Self::Stop => "stop",
            Self::Next => "next",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStateId {
    Idle,
    Pressed,
    WaitingForDoubleTap,
    LongPressFired,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonOutput {
    pub events: [Option<ButtonEvent>; 2],
}

impl ButtonOutput {
    pub fn is_empty(&self) -> bool {
        self.events.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = ButtonEvent> + '_ {
        self.events.iter().flatten().copied()
    }
}

/// A debounced level change, stamped with when the pin actually moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Pressed { at_ms: u64 },
    Released { at_ms: u64 },
}

#[derive(Clone, Copy, Debug)]
enum ButtonHsmEvent {
    Tick { now_ms: u64, edge: Option<Edge> },
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    events: [Option<ButtonEvent>; 2],
}

impl DispatchContext {
    fn emit(&mut self, event: ButtonEvent) {
        for slot in &mut self.events {
            if slot.is_none() {
                *slot = Some(event);
                return;
            }
        }
    }

    fn finish(self) -> ButtonOutput {
        ButtonOutput {
            events: self.events,
        }
    }
}

pub struct ButtonDecoder {
    machine: statig::blocking::StateMachine<ButtonHsm>,
    debouncer: LevelDebouncer,
    active_low: bool,
}

impl Default for ButtonDecoder {
    fn default() -> Self {
        Self::new(&active_config().button)
    }
}

impl ButtonDecoder {
    pub fn new(config: &'static ButtonConfig) -> Self {
        Self {
            machine: ButtonHsm::new(config).state_machine(),
            debouncer: LevelDebouncer::new(config.debounce_ms, false),
            active_low: config.active_low,
        }
    }

    /// Reads the pin once and advances the decoder.
    pub fn poll(&mut self, now_ms: u64, pin: &mut impl InputOps) -> ButtonOutput {
        let pressed = pin.is_high() != self.active_low;
        self.tick(now_ms, pressed)
    }

    /// Advances the decoder with a raw (undebounced) pressed reading.
    pub fn tick(&mut self, now_ms: u64, pressed: bool) -> ButtonOutput {
        let edge = self.debouncer.update(now_ms, pressed).map(|change| {
            if change.level {
                Edge::Pressed {
                    at_ms: change.since_ms,
                }
            } else {
                Edge::Released {
                    at_ms: change.since_ms,
                }
            }
        });

        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&ButtonHsmEvent::Tick { now_ms, edge }, &mut context);
        context.finish()
    }

    pub fn state_id(&self) -> ButtonStateId {
        self.machine.inner().state_id
    }

    pub fn is_pressed(&self) -> bool {
        self.debouncer.level()
    }
}

struct ButtonHsm {
    config: &'static ButtonConfig,
    state_id: ButtonStateId,
    press_start_ms: u64,
    release_ms: u64,
    /// The current press already produced `Next`.
    repeat_press: bool,
}

impl ButtonHsm {
    fn new(config: &'static ButtonConfig) -> Self {
        Self {
            config,
            state_id: ButtonStateId::Idle,
            press_start_ms: 0,
            release_ms: 0,
            repeat_press: false,
        }
    }

    fn enter(&mut self, state_id: ButtonStateId) -> Outcome<State> {
        self.state_id = state_id;
        match state_id {
            ButtonStateId::Idle => Transition(State::idle()),
            ButtonStateId::Pressed => Transition(State::pressed()),
            ButtonStateId::WaitingForDoubleTap => Transition(State::waiting_for_double_tap()),
            ButtonStateId::LongPressFired => Transition(State::long_press_fired()),
        }
    }

    fn begin_press(&mut self, at_ms: u64, repeat_press: bool) -> Outcome<State> {
        self.press_start_ms = at_ms;
        self.repeat_press = repeat_press;
        self.enter(ButtonStateId::Pressed)
    }

    fn held_long(&self, now_ms: u64) -> bool {
        elapsed_ms(now_ms, self.press_start_ms) >= self.config.long_press_ms
    }
}

#[state_machine(initial = "State::idle()")]
impl ButtonHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &ButtonHsmEvent) -> Outcome<State> {
        let _ = context;
        match event {
            ButtonHsmEvent::Tick {
                edge: Some(Edge::Pressed { at_ms }),
                ..
            } => self.begin_press(*at_ms, false),
            ButtonHsmEvent::Tick { .. } => Handled,
        }
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &ButtonHsmEvent) -> Outcome<State> {
        match event {
            ButtonHsmEvent::Tick {
                edge: Some(Edge::Released { at_ms }),
                ..
            } => {
                if self.held_long(*at_ms) {
                    // Too long for a tap; Stop belongs to a poll that saw it held.
                    self.repeat_press = false;
                    return self.enter(ButtonStateId::Idle);
                }
                if self.repeat_press {
                    self.repeat_press = false;
                    return self.enter(ButtonStateId::Idle);
                }
                self.release_ms = *at_ms;
                self.enter(ButtonStateId::WaitingForDoubleTap)
            }
            ButtonHsmEvent::Tick { now_ms, .. } => {
                if self.held_long(*now_ms) {
                    context.emit(ButtonEvent::Stop);
                    return self.enter(ButtonStateId::LongPressFired);
                }
                Handled
            }
        }
    }

    #[state]
    fn waiting_for_double_tap(
        &mut self,
        context: &mut DispatchContext,
        event: &ButtonHsmEvent,
    ) -> Outcome<State> {
        match event {
            ButtonHsmEvent::Tick {
                edge: Some(Edge::Pressed { at_ms }),
                ..
            } => {
                if elapsed_ms(*at_ms, self.release_ms) < self.config.double_tap_window_ms {
                    context.emit(ButtonEvent::Next);
                    return self.begin_press(*at_ms, true);
                }
                // The window ran out between two polls.
                context.emit(ButtonEvent::BandCycle);
                self.begin_press(*at_ms, false)
            }
            ButtonHsmEvent::Tick { now_ms, .. } => {
                if elapsed_ms(*now_ms, self.release_ms) >= self.config.double_tap_window_ms {
                    context.emit(ButtonEvent::BandCycle);
                    return self.enter(ButtonStateId::Idle);
                }
                Handled
            }
        }
    }

    #[state]
    fn long_press_fired(
        &mut self,
        context: &mut DispatchContext,
        event: &ButtonHsmEvent,
    ) -> Outcome<State> {
        let _ = context;
        match event {
            ButtonHsmEvent::Tick {
                edge: Some(Edge::Released { .. }),
                ..
            } => {
                self.repeat_press = false;
                self.enter(ButtonStateId::Idle)
            }
            ButtonHsmEvent::Tick { .. } => Handled,
        }
    }
}

#[cfg(test)]
mod tests;
