use super::*;

/// Raw "pressed" intervals in ms, end exclusive.
fn pressed_at(presses: &[(u64, u64)], now_ms: u64) -> bool {
    presses
        .iter()
        .any(|(start, end)| (*start..*end).contains(&now_ms))
}

/// Polls every 5 ms from 0 to `until_ms` and collects emitted events.
fn run(presses: &[(u64, u64)], until_ms: u64) -> std::vec::Vec<(u64, ButtonEvent)> {
    let mut decoder = ButtonDecoder::default();
    let mut events = std::vec::Vec::new();
    let mut now_ms = 0;
    while now_ms <= until_ms {
        let output = decoder.tick(now_ms, pressed_at(presses, now_ms));
        events.extend(output.iter().map(|event| (now_ms, event)));
        now_ms += 5;
    }
    events
}

fn kinds(events: &[(u64, ButtonEvent)]) -> std::vec::Vec<ButtonEvent> {
    events.iter().map(|(_, event)| *event).collect()
}

#[test]
fn short_press_cycles_band_after_double_tap_window() {
    let events = run(&[(0, 200)], 2_000);

    // Released at 200 (accepted at 250); the window closes 400 ms after the pin moved.
    assert_eq!(events, std::vec![(600, ButtonEvent::BandCycle)]);
}

#[test]
fn long_press_fires_while_still_held() {
    let events = run(&[(0, 3_000)], 4_000);

    // Pressed at 0, threshold reached at 800.
    assert_eq!(events, std::vec![(800, ButtonEvent::Stop)]);
}

#[test]
fn double_tap_fires_next_and_never_band_cycle() {
    let events = run(&[(0, 100), (250, 350)], 3_000);

    assert_eq!(kinds(&events), std::vec![ButtonEvent::Next]);
    assert_eq!(events[0].0, 300);
}

#[test]
fn second_press_held_long_still_stops() {
    let events = run(&[(0, 100), (250, 2_000)], 3_000);

    assert_eq!(
        kinds(&events),
        std::vec![ButtonEvent::Next, ButtonEvent::Stop]
    );
    assert_eq!(events[1].0, 1_050);
}

#[test]
fn presses_after_double_tap_start_fresh() {
    let events = run(&[(0, 100), (250, 350), (1_000, 1_100)], 3_000);

    assert_eq!(
        kinds(&events),
        std::vec![ButtonEvent::Next, ButtonEvent::BandCycle]
    );
}

#[test]
fn contact_bounce_is_ignored() {
    let mut decoder = ButtonDecoder::default();
    let mut events = std::vec::Vec::new();

    for (now_ms, level) in [
        (0, true),
        (10, false),
        (20, true),
        (30, false),
        (40, false),
        (60, false),
        (100, false),
    ] {
        events.extend(decoder.tick(now_ms, level).iter());
    }

    assert!(events.is_empty());
    assert_eq!(decoder.state_id(), ButtonStateId::Idle);
    assert!(!decoder.is_pressed());
}

#[test]
fn short_press_accepted_late_is_still_a_tap() {
    let mut decoder = ButtonDecoder::default();

    assert!(decoder.tick(0, true).is_empty());
    assert!(decoder.tick(50, true).is_empty());
    assert_eq!(decoder.state_id(), ButtonStateId::Pressed);
    assert!(decoder.tick(100, false).is_empty());

    // The release is only accepted here, but the pin moved at 100.
    assert!(decoder.tick(860, false).is_empty());
    assert_eq!(decoder.state_id(), ButtonStateId::WaitingForDoubleTap);

    let output = decoder.tick(865, false);
    assert_eq!(
        output.iter().collect::<std::vec::Vec<_>>(),
        std::vec![ButtonEvent::BandCycle]
    );
    assert_eq!(decoder.state_id(), ButtonStateId::Idle);
}

#[test]
fn late_press_acceptance_measures_hold_from_first_reading() {
    let mut decoder = ButtonDecoder::default();

    decoder.tick(0, true);
    assert!(decoder.tick(790, true).is_empty());
    assert_eq!(decoder.state_id(), ButtonStateId::Pressed);

    let output = decoder.tick(800, true);
    assert_eq!(
        output.iter().collect::<std::vec::Vec<_>>(),
        std::vec![ButtonEvent::Stop]
    );
}

#[test]
fn press_after_window_between_polls_cycles_then_tracks_press() {
    let mut decoder = ButtonDecoder::default();

    decoder.tick(0, true);
    decoder.tick(50, true);
    decoder.tick(100, false);
    decoder.tick(150, false);
    assert_eq!(decoder.state_id(), ButtonStateId::WaitingForDoubleTap);

    let output = decoder.tick(540, true);
    assert_eq!(
        output.iter().collect::<std::vec::Vec<_>>(),
        std::vec![ButtonEvent::BandCycle]
    );
    assert_eq!(decoder.state_id(), ButtonStateId::Idle);

    assert!(decoder.tick(590, true).is_empty());
    assert_eq!(decoder.state_id(), ButtonStateId::Pressed);
}

#[test]
fn long_press_release_returns_to_idle_silently() {
    let mut decoder = ButtonDecoder::default();
    let mut events = std::vec::Vec::new();

    let mut now_ms = 0;
    while now_ms <= 1_500 {
        events.extend(decoder.tick(now_ms, now_ms < 1_000).iter());
        now_ms += 10;
    }

    assert_eq!(events, std::vec![ButtonEvent::Stop]);
    assert_eq!(decoder.state_id(), ButtonStateId::Idle);
}

struct FakePin {
    high: bool,
}

impl InputOps for FakePin {
    fn is_high(&mut self) -> bool {
        self.high
    }
}

#[test]
fn active_low_pin_reads_low_as_pressed() {
    let mut decoder = ButtonDecoder::default();
    let mut pin = FakePin { high: true };

    decoder.poll(0, &mut pin);
    decoder.poll(60, &mut pin);
    assert!(!decoder.is_pressed());

    pin.high = false;
    decoder.poll(100, &mut pin);
    decoder.poll(150, &mut pin);
    assert!(decoder.is_pressed());
    assert_eq!(decoder.state_id(), ButtonStateId::Pressed);
}

#[test]
fn timers_survive_clock_wrap() {
    let mut decoder = ButtonDecoder::default();
    let start = u64::MAX - 30;

    decoder.tick(start, true);
    decoder.tick(start.wrapping_add(50), true);
    decoder.tick(start.wrapping_add(100), false);
    decoder.tick(start.wrapping_add(150), false);
    assert_eq!(decoder.state_id(), ButtonStateId::WaitingForDoubleTap);

    assert!(decoder.tick(start.wrapping_add(495), false).is_empty());
    let output = decoder.tick(start.wrapping_add(500), false);
    assert_eq!(
        output.iter().collect::<std::vec::Vec<_>>(),
        std::vec![ButtonEvent::BandCycle]
    );
}
