//! Test utilities for counter panel functionality

#[cfg(feature = "test-utils")]
pub mod button_simulator {
    //! Button edge simulation for testing

    use crate::controller::{CounterController, EdgeOutcome};
    use crate::types::ButtonId;
    use heapless::Vec;

    /// Maximum events a script can hold
    pub const SCRIPT_CAPACITY: usize = 128;

    /// One raw edge as delivered by the interrupt source
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EdgeEvent {
        pub at_ms: u32,
        pub button: ButtonId,
        /// Line level right after the edge (true = high)
        pub level: bool,
    }

    /// Time-ordered edge sequence
    #[derive(Debug, Clone, Default)]
    pub struct ButtonScript {
        events: Vec<EdgeEvent, SCRIPT_CAPACITY>,
        cursor_ms: u32,
    }

    impl ButtonScript {
        /// Start a script at `start_ms`
        pub fn starting_at(start_ms: u32) -> Self {
            Self {
                events: Vec::new(),
                cursor_ms: start_ms,
            }
        }

        /// Current script time
        pub fn now(&self) -> u32 {
            self.cursor_ms
        }

        /// Let time pass without events
        pub fn wait(mut self, ms: u32) -> Self {
            self.cursor_ms = self.cursor_ms.wrapping_add(ms);
            self
        }

        /// Append a raw edge at the current time
        pub fn edge(mut self, button: ButtonId, level: bool) -> Self {
            // Scripts beyond capacity are a test bug; drop the surplus
            let _ = self.events.push(EdgeEvent {
                at_ms: self.cursor_ms,
                button,
                level,
            });
            self
        }

        /// Clean press and release, `hold_ms` apart
        pub fn press(self, button: ButtonId, hold_ms: u32) -> Self {
            let polarity = button.polarity();
            let pressed = polarity.is_active(true);
            self.edge(button, pressed).wait(hold_ms).edge(button, !pressed)
        }

        /// Press with `bounces` extra make/break pairs `gap_ms` apart,
        /// followed by a release after `hold_ms`
        pub fn bouncy_press(mut self, button: ButtonId, bounces: u8, gap_ms: u32, hold_ms: u32) -> Self {
            let pressed = button.polarity().is_active(true);
            self = self.edge(button, pressed);
            for _ in 0..bounces {
                self = self
                    .wait(gap_ms)
                    .edge(button, !pressed)
                    .wait(gap_ms)
                    .edge(button, pressed);
            }
            self.wait(hold_ms).edge(button, !pressed)
        }

        /// `count` clean presses spaced `period_ms` apart
        pub fn repeat_press(mut self, button: ButtonId, count: usize, period_ms: u32) -> Self {
            let hold = period_ms / 2;
            for _ in 0..count {
                self = self.press(button, hold).wait(period_ms - hold);
            }
            self
        }

        pub fn events(&self) -> &[EdgeEvent] {
            &self.events
        }

        pub fn len(&self) -> usize {
            self.events.len()
        }

        pub fn is_empty(&self) -> bool {
            self.events.is_empty()
        }
    }

    /// Outcome counts of a replay
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ReplayTally {
        pub applied: usize,
        pub clamped: usize,
        pub latched: usize,
        pub suppressed: usize,
        pub ignored: usize,
        /// Edges the channel's interrupt trigger does not fire on
        pub untriggered: usize,
    }

    impl ReplayTally {
        fn count(&mut self, outcome: EdgeOutcome) {
            match outcome {
                EdgeOutcome::Applied => self.applied += 1,
                EdgeOutcome::Clamped => self.clamped += 1,
                EdgeOutcome::Latched => self.latched += 1,
                EdgeOutcome::Suppressed => self.suppressed += 1,
                EdgeOutcome::Ignored => self.ignored += 1,
            }
        }

        /// Events that passed the debounce gate
        pub fn accepted(&self) -> usize {
            self.applied + self.clamped + self.latched
        }
    }

    /// Feed the scripted edges that raise an interrupt to the controller,
    /// as the EXTI trigger configuration would
    pub fn replay(controller: &CounterController, script: &ButtonScript) -> ReplayTally {
        let mut tally = ReplayTally::default();
        for event in script.events() {
            if !event.button.trigger().fires_on(event.level) {
                tally.untriggered += 1;
                continue;
            }
            tally.count(controller.on_edge(event.button, event.level, event.at_ms));
        }
        tally
    }
}
