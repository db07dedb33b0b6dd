//! Scripted button scenarios replayed against the controller and display cycle

use counter_core::hal::mock::MockIndicators;
use counter_core::test_utils::button_simulator::*;
use counter_core::*;
use rstest::rstest;

fn cycle_for(panel: &CounterController) -> DisplayCycle<'_, MockIndicators, LineRecorder<32>> {
    DisplayCycle::new(panel, MockIndicators::new(), LineRecorder::new())
}

#[rstest]
#[case(0, [false, false, false, false])]
#[case(1, [true, false, false, false])]
#[case(5, [true, false, true, false])]
#[case(9, [true, false, false, true])]
#[case(15, [true, true, true, true])]
fn test_binary_presses_render_bits(#[case] presses: usize, #[case] expected: [bool; 4]) {
    let panel = CounterController::new();
    let script = ButtonScript::starting_at(100).repeat_press(ButtonId::Increase, presses, 120);
    replay(&panel, &script);

    let mut cycle = cycle_for(&panel);
    let report = cycle.run_once().unwrap();
    assert_eq!(report.snapshot.value as usize, presses);
    assert_eq!(cycle.indicators().current(), expected);
}

#[rstest]
#[case(0, [false, false, false, false])]
#[case(1, [true, false, false, false])]
#[case(3, [true, true, true, false])]
#[case(4, [true, true, true, true])]
fn test_decimal_presses_render_thermometer(#[case] presses: usize, #[case] expected: [bool; 4]) {
    let panel = CounterController::new();
    let mut cycle = cycle_for(&panel);

    let script = ButtonScript::starting_at(100).press(ButtonId::Mode, 60);
    replay(&panel, &script);
    let report = cycle.run_once().unwrap();
    assert_eq!(report.mode_changed, Some(DisplayMode::Decimal));

    let script = ButtonScript::starting_at(script.now() + 100)
        .repeat_press(ButtonId::Increase, presses, 120);
    replay(&panel, &script);
    cycle.run_once().unwrap();
    assert_eq!(cycle.indicators().current(), expected);
}

#[rstest]
#[case(DisplayMode::Binary, 20, 15)]
#[case(DisplayMode::Decimal, 10, 4)]
fn test_increment_saturates_at_ceiling(
    #[case] mode: DisplayMode,
    #[case] presses: usize,
    #[case] ceiling: u8,
) {
    let panel = CounterController::new();
    let mut script = ButtonScript::starting_at(100);
    if mode == DisplayMode::Decimal {
        script = script.press(ButtonId::Mode, 60).wait(100);
    }
    replay(&panel, &script);
    // Apply the toggle before counting so the reset does not wipe the presses
    panel.take_mode_change();

    let presses_script = ButtonScript::starting_at(script.now() + 100)
        .repeat_press(ButtonId::Increase, presses, 120);
    let tally = replay(&panel, &presses_script);

    assert_eq!(panel.mode(), mode);
    assert_eq!(panel.value(), ceiling);
    assert_eq!(tally.applied, ceiling as usize);
    assert_eq!(tally.clamped, presses - ceiling as usize);
}

#[rstest]
#[case(ButtonId::Increase, 1)]
#[case(ButtonId::Decrease, 0)]
fn test_count_interrupt_sampling_high_still_counts(#[case] button: ButtonId, #[case] expected: u8) {
    let panel = CounterController::new();
    // Contact already bounced open when the handler samples the line
    let outcome = panel.on_edge(button, true, 100);

    assert!(outcome.was_accepted());
    assert_eq!(panel.value(), expected);
    assert_eq!(panel.debounce_watermark(), 100);
}

#[test]
fn test_decrement_at_floor_is_silent() {
    let panel = CounterController::new();
    let script = ButtonScript::starting_at(100).repeat_press(ButtonId::Decrease, 3, 120);
    let tally = replay(&panel, &script);

    assert_eq!(tally.clamped, 3);
    assert_eq!(panel.value(), 0);

    let mut cycle = cycle_for(&panel);
    cycle.run_once().unwrap();
    // Only the status line, nothing about the clamped presses
    assert_eq!(cycle.sink().total(), 1);
    assert_eq!(cycle.sink().last(), Some("Mode: Binary, Value: 0"));
}

#[test]
fn test_global_debounce_spans_buttons() {
    let panel = CounterController::new();
    let script = ButtonScript::starting_at(1000)
        .edge(ButtonId::Increase, false)
        .wait(20)
        // Different button, still inside the shared window
        .edge(ButtonId::Decrease, false)
        .wait(20)
        .edge(ButtonId::Mode, true)
        .wait(60)
        .edge(ButtonId::Decrease, false);
    let tally = replay(&panel, &script);

    assert_eq!(tally.applied, 2);
    assert_eq!(tally.suppressed, 2);
    assert_eq!(panel.value(), 0);
    assert!(!panel.mode_change_pending());
}

#[test]
fn test_events_in_first_interval_after_boot_are_suppressed() {
    let panel = CounterController::new();
    let script = ButtonScript::starting_at(10)
        .edge(ButtonId::Increase, false)
        .wait(40)
        .edge(ButtonId::Increase, false)
        .wait(1)
        .edge(ButtonId::Increase, false);
    let tally = replay(&panel, &script);

    // 10 and 50 are within 50 ms of the zero watermark, 51 is not
    assert_eq!(tally.suppressed, 2);
    assert_eq!(tally.applied, 1);
}

#[test]
fn test_bouncy_mode_press_toggles_once() {
    let panel = CounterController::new();
    let script = ButtonScript::starting_at(500)
        .repeat_press(ButtonId::Increase, 3, 120)
        .bouncy_press(ButtonId::Mode, 6, 2, 300);
    replay(&panel, &script);

    let mut cycle = cycle_for(&panel);
    let first = cycle.run_once().unwrap();
    let second = cycle.run_once().unwrap();

    assert_eq!(first.mode_changed, Some(DisplayMode::Decimal));
    assert_eq!(first.snapshot.value, 0);
    assert_eq!(second.mode_changed, None);
}

#[test]
fn test_full_cycle_log_sequence() {
    let panel = CounterController::new();
    let mut cycle = cycle_for(&panel);
    cycle.start();

    let script = ButtonScript::starting_at(200).repeat_press(ButtonId::Increase, 9, 120);
    replay(&panel, &script);
    cycle.run_once().unwrap();

    let script = ButtonScript::starting_at(script.now() + 100).press(ButtonId::Mode, 80);
    replay(&panel, &script);
    cycle.run_once().unwrap();

    let script = ButtonScript::starting_at(script.now() + 100).repeat_press(ButtonId::Increase, 2, 120);
    replay(&panel, &script);
    let report = cycle.run_once().unwrap();

    let lines: heapless::Vec<&str, 8> = cycle.sink().lines().collect();
    assert_eq!(
        lines.as_slice(),
        [
            "Counter panel started",
            "Mode: Binary, Value: 9",
            "Mode changed to: Decimal",
            "Mode: Decimal, Value: 0",
            "Mode: Decimal, Value: 2",
        ]
    );
    assert_eq!(report.pattern.bits(), 0b0011);
}

#[test]
fn test_second_toggle_returns_to_binary_and_resets() {
    let panel = CounterController::new();
    let mut cycle = cycle_for(&panel);

    let script = ButtonScript::starting_at(100)
        .press(ButtonId::Mode, 100)
        .wait(100)
        .repeat_press(ButtonId::Increase, 3, 120);
    replay(&panel, &script);
    // Latch is applied at the first cycle: presses before it are wiped
    assert_eq!(cycle.run_once().unwrap().snapshot.value, 0);

    let script = ButtonScript::starting_at(script.now() + 100)
        .repeat_press(ButtonId::Increase, 3, 120)
        .press(ButtonId::Mode, 100);
    replay(&panel, &script);
    let report = cycle.run_once().unwrap();

    assert_eq!(report.mode_changed, Some(DisplayMode::Binary));
    assert_eq!(report.snapshot, Snapshot::initial());
}
