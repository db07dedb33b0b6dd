//! Property tests over arbitrary edge streams

use counter_core::*;
use proptest::prelude::*;

fn button() -> impl Strategy<Value = ButtonId> {
    prop_oneof![
        Just(ButtonId::Increase),
        Just(ButtonId::Decrease),
        Just(ButtonId::Mode),
    ]
}

fn mode() -> impl Strategy<Value = DisplayMode> {
    prop_oneof![Just(DisplayMode::Binary), Just(DisplayMode::Decimal)]
}

/// (gap since previous edge, button, level)
fn edge_stream() -> impl Strategy<Value = Vec<(u32, ButtonId, bool)>> {
    prop::collection::vec((0u32..200, button(), any::<bool>()), 0..200)
}

proptest! {
    #[test]
    fn value_never_leaves_mode_range(start in any::<u32>(), edges in edge_stream()) {
        let panel = CounterController::new();
        let mut now = start;
        for (i, (gap, id, level)) in edges.into_iter().enumerate() {
            now = now.wrapping_add(gap);
            panel.on_edge(id, level, now);
            // Main loop runs every few edges
            if i % 3 == 0 {
                panel.take_mode_change();
            }
            let snapshot = panel.snapshot();
            prop_assert!(snapshot.value <= snapshot.mode.max_value());
        }
    }

    #[test]
    fn accepted_edges_are_spaced_beyond_interval(start in any::<u32>(), edges in edge_stream()) {
        let panel = CounterController::new();
        let mut now = start;
        let mut last_accepted: Option<u32> = None;
        for (gap, id, level) in edges {
            now = now.wrapping_add(gap);
            if panel.on_edge(id, level, now).was_accepted() {
                if let Some(prev) = last_accepted {
                    prop_assert!(now.wrapping_sub(prev) > DEBOUNCE_INTERVAL_MS);
                }
                prop_assert_eq!(panel.debounce_watermark(), now);
                last_accepted = Some(now);
            }
        }
    }

    #[test]
    fn suppressed_edges_change_nothing(start in any::<u32>(), edges in edge_stream()) {
        let panel = CounterController::new();
        let mut now = start;
        for (gap, id, level) in edges {
            now = now.wrapping_add(gap);
            let before = (panel.snapshot(), panel.mode_change_pending(), panel.debounce_watermark());
            if panel.on_edge(id, level, now) == EdgeOutcome::Suppressed {
                let after = (panel.snapshot(), panel.mode_change_pending(), panel.debounce_watermark());
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn mode_switch_always_resets_value(edges in edge_stream()) {
        let panel = CounterController::new();
        let mut now = 1_000u32;
        for (gap, id, level) in edges {
            now = now.wrapping_add(gap);
            panel.on_edge(id, level, now);
        }
        let before = panel.mode();
        if let Some(mode) = panel.take_mode_change() {
            prop_assert_eq!(mode, before.toggled());
            prop_assert_eq!(panel.value(), 0);
        } else {
            prop_assert_eq!(panel.mode(), before);
        }
    }

    #[test]
    fn accept_matches_wrapping_difference(now in any::<u32>(), last in any::<u32>(), interval in 0u32..1000) {
        let expected = now.wrapping_sub(last) > interval;
        prop_assert_eq!(accept(now, last, interval), expected);
    }

    #[test]
    fn binary_render_is_little_endian(value in 0u8..=BINARY_MAX) {
        let pattern = LedPattern::new(DisplayMode::Binary, value);
        prop_assert_eq!(pattern.bits(), value);
        prop_assert_eq!(pattern.lit_count() as u32, value.count_ones());
    }

    #[test]
    fn decimal_render_is_contiguous_prefix(value in 0u8..=DECIMAL_MAX) {
        let outputs = render(DisplayMode::Decimal, value);
        for (i, on) in outputs.iter().enumerate() {
            prop_assert_eq!(*on, i < value as usize);
        }
    }

    #[test]
    fn out_of_range_values_are_total(mode in mode(), value in 16u8..=u8::MAX) {
        let outputs = render(mode, value);
        match mode {
            DisplayMode::Binary => {
                prop_assert_eq!(outputs, render(mode, value & 0x0F));
            }
            DisplayMode::Decimal => {
                prop_assert_eq!(outputs, [true; INDICATOR_COUNT]);
            }
        }
    }
}
