#![no_std]

//! Firmware library: board support and embassy tasks for the counter panel

pub use embassy_executor::Spawner;

pub use counter_core::*;

pub use crate::ch32v203_hardware::*;
pub use crate::tasks::*;

// Embassy tasks module
pub mod tasks {
    use super::*;

    /// Diagnostic sink backed by defmt over RTT
    pub struct DefmtSink;

    impl DiagnosticSink for DefmtSink {
        #[allow(unused_variables)]
        fn record(&mut self, diagnostic: &Diagnostic) {
            #[cfg(feature = "defmt")]
            if diagnostic.is_fault() {
                defmt::warn!("⚠️ {}", diagnostic);
            } else {
                defmt::info!("{}", diagnostic);
            }
        }
    }

    /// Display task wrapper
    #[embassy_executor::task]
    pub async fn display_task_wrapper(
        controller: &'static CounterController,
        indicators: Ch32v203Indicators,
        config: PanelConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("💡 Display task started");
        counter_core::cycle::display_task(controller, indicators, DefmtSink, config).await
    }
}

// CH32V203 hardware module
pub mod ch32v203_hardware;

// Time driver for embassy
pub mod time_driver;
