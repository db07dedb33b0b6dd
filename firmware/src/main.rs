#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// RISC-V runtime
use riscv_rt as _;

// Panic handler
#[cfg(feature = "defmt")]
use panic_probe as _;
#[cfg(not(feature = "defmt"))]
use panic_halt as _;

use embassy_executor::Spawner;

use counter_firmware::time_driver::on_systick;
use counter_firmware::*;

// Shared between the button interrupts and the display task
static PANEL: CounterController = CounterController::with_debounce(DEBOUNCE_INTERVAL_MS);
static CLOCK: EmbassyClock = EmbassyClock;

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("🔧 Counter panel v{} starting...", VERSION);

    if let Err(_err) = init_hardware() {
        #[cfg(feature = "defmt")]
        defmt::error!("Hardware init failed: {}", _err);
    }

    // Button and SysTick interrupts start arriving here
    unsafe { riscv::interrupt::enable() };

    let config = default_config();
    #[cfg(feature = "defmt")]
    defmt::info!(
        "⚙️ Debounce {} ms, period {} ms",
        config.debounce_ms,
        config.poll_period.as_millis()
    );

    spawner.must_spawn(display_task_wrapper(&PANEL, Ch32v203Indicators::new(), config));
}

/// Increase button (PA0, falling edge)
#[no_mangle]
extern "C" fn EXTI0_IRQHandler() {
    PANEL.on_increase_edge(CLOCK.now_ms());
    clear_exti(pins::INCREASE_PIN);
}

/// Decrease button (PA1, falling edge)
#[no_mangle]
extern "C" fn EXTI1_IRQHandler() {
    PANEL.on_decrease_edge(CLOCK.now_ms());
    clear_exti(pins::DECREASE_PIN);
}

/// Mode button (PA2, both edges)
#[no_mangle]
extern "C" fn EXTI2_IRQHandler() {
    PANEL.on_mode_level(MODE_BUTTON.read_level(), CLOCK.now_ms());
    clear_exti(pins::MODE_PIN);
}

/// 1 kHz time base
#[no_mangle]
extern "C" fn SysTick_Handler() {
    clear_systick_flag();
    on_systick();
}
