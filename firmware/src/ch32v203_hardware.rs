//! CH32V203 Hardware Implementation
//!
//! Register-level GPIO, EXTI and SysTick setup for the counter panel.
//! Buttons on PA0..PA2, indicators on PB12..PB15.

use counter_core::{ButtonId, ButtonInput, HalError, IndicatorBank, Polarity, INDICATOR_COUNT};

/// Peripheral base addresses and register offsets
pub mod regs {
    pub const RCC_BASE: u32 = 0x4002_1000;
    pub const AFIO_BASE: u32 = 0x4001_0000;
    pub const EXTI_BASE: u32 = 0x4001_0400;
    pub const GPIOA_BASE: u32 = 0x4001_0800;
    pub const GPIOB_BASE: u32 = 0x4001_0C00;
    pub const PFIC_BASE: u32 = 0xE000_E000;
    pub const STK_BASE: u32 = 0xE000_F000;

    /// APB2 peripheral clock enable register
    pub const RCC_APB2PCENR: u32 = 0x18;

    /// GPIO register offsets
    pub const GPIO_CFGLR: u32 = 0x00;
    pub const GPIO_CFGHR: u32 = 0x04;
    pub const GPIO_INDR: u32 = 0x08;
    pub const GPIO_OUTDR: u32 = 0x0C;
    pub const GPIO_BSHR: u32 = 0x10;

    /// AFIO external interrupt configuration register 1 (lines 0..3)
    pub const AFIO_EXTICR1: u32 = 0x08;

    /// EXTI register offsets
    pub const EXTI_INTENR: u32 = 0x00;
    pub const EXTI_RTENR: u32 = 0x08;
    pub const EXTI_FTENR: u32 = 0x0C;
    pub const EXTI_INTFR: u32 = 0x14;

    /// PFIC interrupt enable set register (IRQs 0..31)
    pub const PFIC_IENR1: u32 = 0x100;

    /// SysTick register offsets
    pub const STK_CTLR: u32 = 0x00;
    pub const STK_SR: u32 = 0x04;
    pub const STK_CNTL: u32 = 0x08;
    pub const STK_CMPLR: u32 = 0x10;

    /// Interrupt numbers
    pub const IRQ_SYSTICK: u32 = 12;
    pub const IRQ_EXTI0: u32 = 22;
}

/// CH32V203 pin configuration constants
pub mod pins {
    /// Increase button (pull-up, falling edge)
    pub const INCREASE_PIN: u8 = 0; // PA0

    /// Decrease button (pull-up, falling edge)
    pub const DECREASE_PIN: u8 = 1; // PA1

    /// Mode button (pull-down, both edges)
    pub const MODE_PIN: u8 = 2; // PA2

    /// First of four consecutive indicator outputs
    pub const FIRST_INDICATOR_PIN: u8 = 12; // PB12..PB15
}

/// HSI clock after reset
pub const HCLK_HZ: u32 = 8_000_000;

unsafe fn read_reg(addr: u32) -> u32 {
    core::ptr::read_volatile(addr as *const u32)
}

unsafe fn write_reg(addr: u32, value: u32) {
    core::ptr::write_volatile(addr as *mut u32, value);
}

unsafe fn modify_reg(addr: u32, f: impl FnOnce(u32) -> u32) {
    write_reg(addr, f(read_reg(addr)));
}

/// Set the 4-bit CNF/MODE field of one pin
unsafe fn configure_pin(port: u32, pin: u8, cfg: u32) {
    let (reg, shift) = if pin < 8 {
        (port + regs::GPIO_CFGLR, pin as u32 * 4)
    } else {
        (port + regs::GPIO_CFGHR, (pin as u32 - 8) * 4)
    };
    modify_reg(reg, |v| (v & !(0xF << shift)) | (cfg << shift));
}

/// Input with pull resistor (CNF=10, MODE=00)
const CFG_INPUT_PULL: u32 = 0x8;
/// Push-pull output, 2 MHz (CNF=00, MODE=10)
const CFG_OUTPUT_PP: u32 = 0x2;

/// Button input on GPIOA
pub struct Ch32v203Button {
    port: u32,
    pin: u8,
    polarity: Polarity,
}

impl Ch32v203Button {
    pub const fn new(port: u32, pin: u8, polarity: Polarity) -> Self {
        Self { port, pin, polarity }
    }

    /// Raw line level, safe to call from interrupt context
    pub fn read_level(&self) -> bool {
        let indr = unsafe { read_reg(self.port + regs::GPIO_INDR) };
        indr & (1 << self.pin) != 0
    }

    fn init(&self) {
        unsafe {
            configure_pin(self.port, self.pin, CFG_INPUT_PULL);
            // OUTDR selects pull-up (1) or pull-down (0) in input mode
            let pull_up = matches!(self.polarity, Polarity::ActiveLow);
            modify_reg(self.port + regs::GPIO_OUTDR, |v| {
                if pull_up {
                    v | (1 << self.pin)
                } else {
                    v & !(1 << self.pin)
                }
            });
        }
    }
}

impl ButtonInput for Ch32v203Button {
    type Error = HalError;

    fn level(&mut self) -> Result<bool, Self::Error> {
        Ok(self.read_level())
    }

    fn polarity(&self) -> Polarity {
        self.polarity
    }
}

pub static INCREASE_BUTTON: Ch32v203Button =
    Ch32v203Button::new(regs::GPIOA_BASE, pins::INCREASE_PIN, ButtonId::Increase.polarity());
pub static DECREASE_BUTTON: Ch32v203Button =
    Ch32v203Button::new(regs::GPIOA_BASE, pins::DECREASE_PIN, ButtonId::Decrease.polarity());
pub static MODE_BUTTON: Ch32v203Button =
    Ch32v203Button::new(regs::GPIOA_BASE, pins::MODE_PIN, ButtonId::Mode.polarity());

/// Four indicator outputs on consecutive GPIOB pins
pub struct Ch32v203Indicators {
    port: u32,
    first_pin: u8,
}

impl Ch32v203Indicators {
    pub const fn new() -> Self {
        Self {
            port: regs::GPIOB_BASE,
            first_pin: pins::FIRST_INDICATOR_PIN,
        }
    }

    fn init(&self) {
        for i in 0..INDICATOR_COUNT as u8 {
            unsafe { configure_pin(self.port, self.first_pin + i, CFG_OUTPUT_PP) };
        }
    }
}

impl IndicatorBank for Ch32v203Indicators {
    type Error = HalError;

    fn show(&mut self, pattern: [bool; INDICATOR_COUNT]) -> Result<(), Self::Error> {
        // BSHR low half sets, high half resets: all four change in one write
        let mut bshr = 0u32;
        for (i, on) in pattern.iter().enumerate() {
            let bit = 1u32 << (self.first_pin as u32 + i as u32);
            if *on {
                bshr |= bit;
            } else {
                bshr |= bit << 16;
            }
        }
        unsafe { write_reg(self.port + regs::GPIO_BSHR, bshr) };
        Ok(())
    }
}

/// Bring up clocks, pins, button interrupts and the 1 kHz SysTick
pub fn init_hardware() -> Result<(), HalError> {
    enable_peripheral_clocks();

    INCREASE_BUTTON.init();
    DECREASE_BUTTON.init();
    MODE_BUTTON.init();

    let mut indicators = Ch32v203Indicators::new();
    indicators.init();
    indicators.show([false; INDICATOR_COUNT])?;

    configure_exti();
    configure_systick(HCLK_HZ)?;

    #[cfg(feature = "defmt")]
    defmt::info!("CH32V203 panel hardware initialized");

    Ok(())
}

fn enable_peripheral_clocks() {
    unsafe {
        // Bit 0 = AFIO, Bit 2 = GPIOA, Bit 3 = GPIOB
        modify_reg(regs::RCC_BASE + regs::RCC_APB2PCENR, |v| v | (1 << 0) | (1 << 2) | (1 << 3));
    }
}

/// EXTI line of each button (line number = PAx pin number)
const BUTTON_LINES: [(ButtonId, u8); 3] = [
    (ButtonId::Increase, pins::INCREASE_PIN),
    (ButtonId::Decrease, pins::DECREASE_PIN),
    (ButtonId::Mode, pins::MODE_PIN),
];

fn configure_exti() {
    let mut lines = 0u32;
    let mut rising = 0u32;
    let mut falling = 0u32;
    for (button, pin) in BUTTON_LINES {
        let mask = 1u32 << pin;
        let trigger = button.trigger();
        lines |= mask;
        if trigger.rising() {
            rising |= mask;
        }
        if trigger.falling() {
            falling |= mask;
        }
    }

    unsafe {
        // Lines 0..2 sourced from port A (selector 0)
        modify_reg(regs::AFIO_BASE + regs::AFIO_EXTICR1, |v| v & !0x0FFF);

        modify_reg(regs::EXTI_BASE + regs::EXTI_FTENR, |v| v | falling);
        modify_reg(regs::EXTI_BASE + regs::EXTI_RTENR, |v| v | rising);

        // Drop anything latched during pin setup
        write_reg(regs::EXTI_BASE + regs::EXTI_INTFR, lines);
        modify_reg(regs::EXTI_BASE + regs::EXTI_INTENR, |v| v | lines);

        // EXTI0, EXTI1, EXTI2 are consecutive IRQs
        let irqs = 0b111 << regs::IRQ_EXTI0;
        write_reg(regs::PFIC_BASE + regs::PFIC_IENR1, irqs);
    }
}

fn configure_systick(hclk_hz: u32) -> Result<(), HalError> {
    if hclk_hz < 1000 {
        return Err(HalError::InvalidConfig);
    }
    unsafe {
        write_reg(regs::STK_BASE + regs::STK_SR, 0);
        write_reg(regs::STK_BASE + regs::STK_CNTL, 0);
        write_reg(regs::STK_BASE + regs::STK_CMPLR, hclk_hz / 1000 - 1);
        // STE | STIE | STCLK (HCLK) | STRE (auto-reload)
        write_reg(regs::STK_BASE + regs::STK_CTLR, 0xF);
        write_reg(regs::PFIC_BASE + regs::PFIC_IENR1, 1 << regs::IRQ_SYSTICK);
    }
    Ok(())
}

/// Acknowledge the SysTick compare flag
pub fn clear_systick_flag() {
    unsafe { write_reg(regs::STK_BASE + regs::STK_SR, 0) };
}

/// Acknowledge a pending EXTI line
pub fn clear_exti(line: u8) {
    unsafe { write_reg(regs::EXTI_BASE + regs::EXTI_INTFR, 1 << line) };
}
