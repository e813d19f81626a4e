//! Core clock frequency as currently configured in RCC.
//!
//! Only reads the clock tree; whoever set it up (reset defaults or startup
//! code) is responsible for its state.

use crate::regs::{Field, Register, RegisterFile};

pub const HSI16_HZ: u32 = 16_000_000;

// RCC_CR
const HSI16DIVF: Field = Field::new(4, 1);
// RCC_ICSCR
const MSIRANGE: Field = Field::new(13, 3);
// RCC_CFGR
const SWS: Field = Field::new(2, 2);
const HPRE: Field = Field::new(4, 4);
const PLLSRC: Field = Field::new(16, 1);
const PLLMUL: Field = Field::new(18, 4);
const PLLDIV: Field = Field::new(22, 2);

const PLL_MULTIPLIERS: [u32; 9] = [3, 4, 6, 8, 12, 16, 24, 32, 48];
const AHB_SHIFT: [u32; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 6, 7, 8, 9];

/// Clock driving the system clock switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysClkSource {
    Msi,
    Hsi16,
    Hse,
    Pll,
}

impl SysClkSource {
    fn from_sws(bits: u32) -> Self {
        match bits {
            0b00 => SysClkSource::Msi,
            0b01 => SysClkSource::Hsi16,
            0b10 => SysClkSource::Hse,
            _ => SysClkSource::Pll,
        }
    }
}

/// Source selected by the switch status bits.
pub fn sysclk_source<R: RegisterFile>(regs: &R) -> SysClkSource {
    SysClkSource::from_sws(regs.field(Register::RccCfgr, SWS))
}

/// MSI frequency for a MSIRANGE value: 65.536 kHz doubling up to 4.194 MHz.
pub const fn msi_hz(range: u32) -> u32 {
    32_768 << (range + 1)
}

fn hsi16_hz(cr: u32) -> u32 {
    if HSI16DIVF.extract(cr) != 0 {
        HSI16_HZ / 4
    } else {
        HSI16_HZ
    }
}

/// SYSCLK in Hz. `hse_hz` is the board's external oscillator frequency.
///
/// `None` if the PLL output does not fit in 32 bits.
pub fn sysclk_hz<R: RegisterFile>(regs: &R, hse_hz: u32) -> Option<u32> {
    let cr = regs.read(Register::RccCr);
    match sysclk_source(regs) {
        SysClkSource::Msi => Some(msi_hz(regs.field(Register::RccIcscr, MSIRANGE))),
        SysClkSource::Hsi16 => Some(hsi16_hz(cr)),
        SysClkSource::Hse => Some(hse_hz),
        SysClkSource::Pll => {
            let cfgr = regs.read(Register::RccCfgr);
            // Reserved multiplier encodings fall back to the largest one.
            let mul = PLL_MULTIPLIERS
                .get(PLLMUL.extract(cfgr) as usize)
                .copied()
                .unwrap_or(48);
            let div = PLLDIV.extract(cfgr) + 1;
            let input = if PLLSRC.extract(cfgr) == 0 {
                hsi16_hz(cr)
            } else {
                hse_hz
            };
            input.checked_mul(mul).map(|hz| hz / div)
        }
    }
}

/// HCLK in Hz, the frequency the Cortex-M0+ core and SysTick run at.
pub fn core_clock_hz<R: RegisterFile>(regs: &R, hse_hz: u32) -> Option<u32> {
    let shift = AHB_SHIFT[regs.field(Register::RccCfgr, HPRE) as usize];
    sysclk_hz(regs, hse_hz).map(|hz| hz >> shift)
}
