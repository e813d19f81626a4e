//! The real register bank, through the STM32L0 PAC.

#[cfg(feature = "rt")]
use cortex_m::peripheral::SYST;

#[cfg(feature = "rt")]
use crate::{
    board::Board,
    config::BoardConfig,
    error::Error,
    interrupt::CortexM,
    tick::{TICKS, Wfi},
};
use crate::pac::{GPIOA, GPIOB, GPIOC, RCC};
use crate::pins::Port;
use crate::regs::{Register, RegisterFile};

/// Board running on the chip itself.
///
/// Only available with `rt`, which provides the SysTick handler the armed
/// timer needs.
#[cfg(feature = "rt")]
pub type Stm32l0Board = Board<PacRegisters, CortexM, SYST, Wfi>;

/// Owns the RCC and GPIO peripherals, so nothing else can touch them.
pub struct PacRegisters {
    rcc: RCC,
    gpioa: GPIOA,
    gpiob: GPIOB,
    gpioc: GPIOC,
}

impl PacRegisters {
    pub fn new(rcc: RCC, gpioa: GPIOA, gpiob: GPIOB, gpioc: GPIOC) -> Self {
        Self {
            rcc,
            gpioa,
            gpiob,
            gpioc,
        }
    }

    pub fn free(self) -> (RCC, GPIOA, GPIOB, GPIOC) {
        (self.rcc, self.gpioa, self.gpiob, self.gpioc)
    }
}

// Each port has its own register block type in the PAC, so the access is
// expanded once per port.
macro_rules! on_port {
    ($self:ident, $port:expr, $reg:ident, |$r:ident| $body:expr) => {
        match $port {
            Port::A => {
                let $r = &$self.gpioa.$reg;
                $body
            }
            Port::B => {
                let $r = &$self.gpiob.$reg;
                $body
            }
            Port::C => {
                let $r = &$self.gpioc.$reg;
                $body
            }
        }
    };
}

impl RegisterFile for PacRegisters {
    fn read(&self, reg: Register) -> u32 {
        match reg {
            Register::RccCr => self.rcc.cr.read().bits(),
            Register::RccIcscr => self.rcc.icscr.read().bits(),
            Register::RccCfgr => self.rcc.cfgr.read().bits(),
            Register::ClockEnable => self.rcc.iopenr.read().bits(),
            Register::Moder(port) => on_port!(self, port, moder, |r| r.read().bits()),
            Register::Otyper(port) => on_port!(self, port, otyper, |r| r.read().bits()),
            Register::Ospeedr(port) => on_port!(self, port, ospeedr, |r| r.read().bits()),
            Register::Pupdr(port) => on_port!(self, port, pupdr, |r| r.read().bits()),
            Register::Idr(port) => on_port!(self, port, idr, |r| r.read().bits()),
            Register::Odr(port) => on_port!(self, port, odr, |r| r.read().bits()),
            Register::Afrl(port) => on_port!(self, port, afrl, |r| r.read().bits()),
            Register::Afrh(port) => on_port!(self, port, afrh, |r| r.read().bits()),
            // write only
            Register::Bsrr(_) | Register::Brr(_) => 0,
        }
    }

    fn write(&mut self, reg: Register, value: u32) {
        match reg {
            Register::ClockEnable => self.rcc.iopenr.write(|w| unsafe { w.bits(value) }),
            Register::Moder(port) => {
                on_port!(self, port, moder, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            Register::Otyper(port) => {
                on_port!(self, port, otyper, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            Register::Ospeedr(port) => {
                on_port!(self, port, ospeedr, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            Register::Pupdr(port) => {
                on_port!(self, port, pupdr, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            Register::Bsrr(port) => {
                on_port!(self, port, bsrr, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            Register::Brr(port) => {
                on_port!(self, port, brr, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            Register::Afrl(port) => {
                on_port!(self, port, afrl, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            Register::Afrh(port) => {
                on_port!(self, port, afrh, |r| r.write(|w| unsafe { w.bits(value) }))
            }
            // Input data is read only, output data only changes through
            // BSRR/BRR, and the clock tree is never reconfigured here.
            Register::Idr(_)
            | Register::Odr(_)
            | Register::RccCr
            | Register::RccIcscr
            | Register::RccCfgr => {}
        }
    }
}

/// Brings the board up with the default configuration: reads the core
/// clock and starts the 1 ms SysTick interrupt that drives [`TICKS`].
#[cfg(feature = "rt")]
pub fn init(
    syst: SYST,
    rcc: RCC,
    gpioa: GPIOA,
    gpiob: GPIOB,
    gpioc: GPIOC,
) -> Result<Stm32l0Board, Error> {
    init_with(BoardConfig::default(), syst, rcc, gpioa, gpiob, gpioc)
}

#[cfg(feature = "rt")]
pub fn init_with(
    config: BoardConfig,
    syst: SYST,
    rcc: RCC,
    gpioa: GPIOA,
    gpiob: GPIOB,
    gpioc: GPIOC,
) -> Result<Stm32l0Board, Error> {
    Board::init(
        PacRegisters::new(rcc, gpioa, gpiob, gpioc),
        CortexM,
        syst,
        Wfi,
        &TICKS,
        config,
    )
}
