//! Board bring-up and the application-facing API.

use cortex_m::peripheral::SYST;
use cortex_m::peripheral::syst::SystClkSource;

use crate::clock;
use crate::config::{BoardConfig, TICK_HZ};
use crate::error::Error;
use crate::gpio::{Gpio, OutputConfig, PinMode};
use crate::interrupt::InterruptControl;
use crate::pins::Handle;
use crate::regs::RegisterFile;
use crate::tick::{self, Sleep, TickCounter};

/// Largest value the 24-bit SysTick reload register holds.
pub const SYST_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Periodic timer that raises the tick interrupt.
pub trait TickTimer {
    /// Starts periodic interrupts every `reload` core clock cycles.
    fn arm(&mut self, reload: u32);
}

impl TickTimer for SYST {
    fn arm(&mut self, reload: u32) {
        self.disable_counter();
        self.set_clock_source(SystClkSource::Core);
        // counts reload-1 down to 0
        self.set_reload(reload - 1);
        self.clear_current();
        self.enable_interrupt();
        self.enable_counter();
    }
}

/// Core clock cycles per tick. Zero or a reload beyond the 24-bit counter is
/// rejected.
pub fn reload_for(core_clock_hz: u32) -> Result<u32, Error> {
    let reload = core_clock_hz / TICK_HZ;
    if reload == 0 || reload - 1 > SYST_MAX_RELOAD {
        return Err(Error::ReloadOutOfRange);
    }
    Ok(reload)
}

/// Everything the application needs: pin configuration, pin I/O and a
/// millisecond delay.
pub struct Board<R, I, T, S> {
    gpio: Gpio<R, I>,
    timer: T,
    sleep: S,
    ticks: &'static TickCounter,
    config: BoardConfig,
    core_clock_hz: u32,
}

impl<R, I, T, S> Board<R, I, T, S>
where
    R: RegisterFile,
    I: InterruptControl,
    T: TickTimer,
    S: Sleep,
{
    /// Reads the core clock and arms the tick timer.
    ///
    /// Must run before `delay`. `ticks` is the counter the timer interrupt
    /// increments.
    pub fn init(
        regs: R,
        irq: I,
        timer: T,
        sleep: S,
        ticks: &'static TickCounter,
        config: BoardConfig,
    ) -> Result<Self, Error> {
        let mut board = Self {
            gpio: Gpio::new(regs, irq),
            timer,
            sleep,
            ticks,
            config,
            core_clock_hz: 0,
        };
        board.rearm()?;
        Ok(board)
    }

    /// Re-reads the core clock and re-arms the tick timer, e.g. after the
    /// clock tree changed. The tick count carries on from where it was.
    ///
    /// Returns the reload value. On error the timer is left as it was.
    pub fn rearm(&mut self) -> Result<u32, Error> {
        let hz = clock::core_clock_hz(self.gpio.registers(), self.config.hse_hz)
            .ok_or(Error::ReloadOutOfRange)?;
        let reload = reload_for(hz)?;
        trace!("core clock {} Hz, systick reload {}", hz, reload);
        self.timer.arm(reload);
        self.core_clock_hz = hz;
        Ok(reload)
    }

    pub fn core_clock_hz(&self) -> u32 {
        self.core_clock_hz
    }

    pub fn set_mode(&mut self, handle: impl Into<Handle>, mode: PinMode) -> Result<(), Error> {
        self.gpio.set_mode(handle, mode)
    }

    pub fn set_mode_raw(&mut self, handle: u8, mode: u8) -> Result<(), Error> {
        self.gpio.set_mode_raw(handle, mode)
    }

    pub fn configure_output(
        &mut self,
        handle: impl Into<Handle>,
        config: OutputConfig,
    ) -> Result<(), Error> {
        self.gpio.configure_output(handle, config)
    }

    /// See [`Gpio::read`]; output pins read back their driven level.
    pub fn read(&self, handle: impl Into<Handle>) -> Result<bool, Error> {
        self.gpio.read(handle)
    }

    pub fn write(&mut self, handle: impl Into<Handle>, high: bool) -> Result<(), Error> {
        self.gpio.write(handle, high)
    }

    pub fn toggle(&mut self, handle: impl Into<Handle>) -> Result<(), Error> {
        self.gpio.toggle(handle)
    }

    /// Sleeps for `ms` milliseconds. Not interruptible.
    pub fn delay(&mut self, ms: u32) {
        tick::delay(self.ticks, &mut self.sleep, ms);
    }

    /// Milliseconds since the tick timer was first armed, wrapping.
    pub fn ticks(&self) -> u32 {
        self.ticks.now()
    }

    pub fn gpio(&self) -> &Gpio<R, I> {
        &self.gpio
    }

    pub fn gpio_mut(&mut self) -> &mut Gpio<R, I> {
        &mut self.gpio
    }

    pub fn free(self) -> (Gpio<R, I>, T, S) {
        (self.gpio, self.timer, self.sleep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeInterrupts, FakeRegisters, TickingSleep};
    use crate::regs::Register;

    #[derive(Default)]
    struct FakeTimer {
        armed: Vec<u32>,
    }

    impl TickTimer for FakeTimer {
        fn arm(&mut self, reload: u32) {
            self.armed.push(reload);
        }
    }

    fn hsi16() -> FakeRegisters {
        let mut regs = FakeRegisters::new();
        regs.preset(Register::RccCfgr, 0b01 << 2);
        regs
    }

    #[test]
    fn reload_is_one_millisecond_of_core_clock() {
        assert_eq!(reload_for(16_000_000), Ok(16_000));
        assert_eq!(reload_for(2_097_152), Ok(2_097));
        assert_eq!(reload_for(32_000_000), Ok(32_000));
    }

    #[test]
    fn reload_range() {
        assert_eq!(reload_for(999), Err(Error::ReloadOutOfRange));
        assert_eq!(reload_for(1_000), Ok(1));
        assert_eq!(reload_for(u32::MAX), Ok(u32::MAX / TICK_HZ));
        assert!(reload_for(u32::MAX).unwrap() - 1 <= SYST_MAX_RELOAD);
    }

    #[test]
    fn init_arms_the_timer_from_the_core_clock() {
        static TICKS: TickCounter = TickCounter::new();
        let board = Board::init(
            hsi16(),
            FakeInterrupts::default(),
            FakeTimer::default(),
            TickingSleep::new(&TICKS),
            &TICKS,
            BoardConfig::default(),
        )
        .unwrap();

        assert_eq!(board.core_clock_hz(), 16_000_000);
        let (_, timer, _) = board.free();
        assert_eq!(timer.armed, vec![16_000]);
    }

    #[test]
    fn rearm_keeps_the_tick_count() {
        static TICKS: TickCounter = TickCounter::new();
        let mut board = Board::init(
            hsi16(),
            FakeInterrupts::default(),
            FakeTimer::default(),
            TickingSleep::new(&TICKS),
            &TICKS,
            BoardConfig::default(),
        )
        .unwrap();

        board.delay(7);
        board.gpio_mut().registers_mut().preset(Register::RccCfgr, 0);
        board.gpio_mut().registers_mut().preset(Register::RccIcscr, 0b110 << 13);
        assert_eq!(board.rearm(), Ok(4_194));
        assert_eq!(board.ticks(), 7);

        let (_, timer, _) = board.free();
        assert_eq!(timer.armed, vec![16_000, 4_194]);
    }

    #[test]
    fn init_fails_without_arming_on_a_bad_clock() {
        static TICKS: TickCounter = TickCounter::new();
        // HSE selected but the board reports no crystal
        let mut regs = FakeRegisters::new();
        regs.preset(Register::RccCfgr, 0b10 << 2);
        let result = Board::init(
            regs,
            FakeInterrupts::default(),
            FakeTimer::default(),
            TickingSleep::new(&TICKS),
            &TICKS,
            BoardConfig { hse_hz: 0 },
        );
        assert!(matches!(result, Err(Error::ReloadOutOfRange)));
    }

    #[test]
    fn init_rejects_a_pll_output_beyond_u32() {
        static TICKS: TickCounter = TickCounter::new();
        // PLL from HSE, x48 /2
        let mut regs = FakeRegisters::new();
        regs.preset(
            Register::RccCfgr,
            (0b11 << 2) | (1 << 16) | (0b1000 << 18) | (0b01 << 22),
        );
        let result = Board::init(
            regs,
            FakeInterrupts::default(),
            FakeTimer::default(),
            TickingSleep::new(&TICKS),
            &TICKS,
            BoardConfig {
                hse_hz: 100_000_000,
            },
        );
        assert!(matches!(result, Err(Error::ReloadOutOfRange)));
    }

    #[test]
    fn delay_through_the_board() {
        static TICKS: TickCounter = TickCounter::starting_at(u32::MAX - 2);
        let mut board = Board::init(
            hsi16(),
            FakeInterrupts::default(),
            FakeTimer::default(),
            TickingSleep::new(&TICKS),
            &TICKS,
            BoardConfig::default(),
        )
        .unwrap();

        board.delay(0);
        assert_eq!(board.ticks(), u32::MAX - 2);
        board.delay(5);
        assert_eq!(board.ticks(), 2);
    }
}
