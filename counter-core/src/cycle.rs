//! Main loop consumer: apply mode changes, render, log

use crate::controller::CounterController;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::hal::{HalError, IndicatorBank};
use crate::render::LedPattern;
use crate::types::{DisplayMode, Snapshot};

/// What one pass of the main loop observed and wrote
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CycleReport {
    pub snapshot: Snapshot,
    pub pattern: LedPattern,
    pub mode_changed: Option<DisplayMode>,
}

/// One main loop pass over the shared controller
pub struct DisplayCycle<'a, I, S> {
    controller: &'a CounterController,
    indicators: I,
    sink: S,
    cycles: u32,
}

impl<'a, I, S> DisplayCycle<'a, I, S>
where
    I: IndicatorBank,
    S: DiagnosticSink,
{
    pub fn new(controller: &'a CounterController, indicators: I, sink: S) -> Self {
        Self {
            controller,
            indicators,
            sink,
            cycles: 0,
        }
    }

    /// Log the startup banner
    pub fn start(&mut self) {
        self.sink.record(&Diagnostic::Started);
    }

    /// Run one cycle. The mode change and the status line are logged even
    /// when the indicator write fails.
    pub fn run_once(&mut self) -> Result<CycleReport, I::Error> {
        let mode_changed = self.controller.take_mode_change();
        if let Some(mode) = mode_changed {
            self.sink.record(&Diagnostic::ModeChanged(mode));
        }

        let snapshot = self.controller.snapshot();
        let pattern = LedPattern::new(snapshot.mode, snapshot.value);
        let written = self.indicators.show(pattern.0);

        self.sink.record(&Diagnostic::Status(snapshot));
        self.cycles = self.cycles.wrapping_add(1);

        written.map(|()| CycleReport {
            snapshot,
            pattern,
            mode_changed,
        })
    }

    /// Record an indicator fault reported by `run_once`
    pub fn report_fault(&mut self, err: HalError) {
        self.sink.record(&Diagnostic::OutputFault(err));
    }

    /// Number of cycles run so far
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the output bank and sink
    pub fn release(self) -> (I, S) {
        (self.indicators, self.sink)
    }
}

/// Async task running the display cycle at a fixed period
#[cfg(feature = "embassy-time")]
pub async fn display_task<I, S>(
    controller: &CounterController,
    indicators: I,
    sink: S,
    config: crate::types::PanelConfig,
) -> !
where
    I: IndicatorBank<Error = HalError>,
    S: DiagnosticSink,
{
    use embassy_time::Ticker;

    let mut cycle = DisplayCycle::new(controller, indicators, sink);
    let mut ticker = Ticker::every(config.poll_period);
    cycle.start();

    loop {
        if let Err(err) = cycle.run_once() {
            cycle.report_fault(err);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Cycle {} done", cycle.cycles());

        ticker.next().await;
    }
}
