// Host-side walkthrough of the counter panel with mock hardware

use counter_core::hal::mock::MockIndicators;
use counter_core::test_utils::button_simulator::*;
use counter_core::*;

fn main() {
    println!("🧪 Counter Panel Host Walkthrough (core v{})", VERSION);

    let config = default_config();
    println!(
        "⚙️ Debounce {} ms, display period {} ms",
        config.debounce_ms,
        config.poll_period.as_millis()
    );

    let panel = CounterController::with_debounce(config.debounce_ms);
    let mut cycle = DisplayCycle::new(&panel, MockIndicators::new(), LineRecorder::<64>::new());
    cycle.start();

    // Nine presses in Binary
    let script = ButtonScript::starting_at(200).repeat_press(ButtonId::Increase, 9, 120);
    show_step(&panel, &mut cycle, &script);

    // Bouncy mode press: one toggle, counter reset
    let script = ButtonScript::starting_at(script.now() + 100).bouncy_press(ButtonId::Mode, 3, 4, 150);
    show_step(&panel, &mut cycle, &script);

    // Two presses in Decimal
    let script = ButtonScript::starting_at(script.now() + 100).repeat_press(ButtonId::Increase, 2, 120);
    show_step(&panel, &mut cycle, &script);

    // Decimal ceiling
    let script = ButtonScript::starting_at(script.now() + 100).repeat_press(ButtonId::Increase, 5, 120);
    show_step(&panel, &mut cycle, &script);

    println!();
    println!("📝 Log:");
    for line in cycle.sink().lines() {
        println!("  {}", line);
    }
    println!("✅ Walkthrough finished after {} cycles", cycle.cycles());
}

fn show_step(
    panel: &CounterController,
    cycle: &mut DisplayCycle<'_, MockIndicators, LineRecorder<64>>,
    script: &ButtonScript,
) {
    let tally = replay(panel, script);
    match cycle.run_once() {
        Ok(report) => println!(
            "  {:?} -> {:?} {} | accepted {}, suppressed {}, clamped {}",
            report.snapshot.mode,
            report.snapshot.value,
            indicator_string(report.pattern),
            tally.accepted(),
            tally.suppressed,
            tally.clamped,
        ),
        Err(err) => {
            println!("  ❌ {}", err);
            cycle.report_fault(err);
        }
    }
}

fn indicator_string(pattern: LedPattern) -> String {
    pattern.0.iter().map(|on| if *on { '●' } else { '○' }).collect()
}
