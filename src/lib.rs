//! Board support for STM32L0 (Cortex-M0+) parts.
//!
//! Provides a 1 ms SysTick time base with a sleeping delay, and GPIO pins
//! addressed through small handles from a fixed board table. All register
//! traffic goes through [`regs::RegisterFile`], so everything above the PAC
//! binding runs against a fake register bank on the host.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod board;
pub mod clock;
pub mod config;
pub mod device;
pub mod error;
pub mod gpio;
pub mod interrupt;
pub mod pins;
pub mod regs;
pub mod tick;

#[cfg(test)]
mod fake;

pub use board::Board;
pub use config::BoardConfig;
#[cfg(feature = "rt")]
pub use device::{Stm32l0Board, init};
pub use error::Error;
pub use gpio::{OutputConfig, OutputType, PinMode, Pull, Speed};
pub use pins::{Handle, Pin, Port};
pub use tick::{TICKS, TickCounter};

#[cfg(feature = "stm32l0x1")]
pub use stm32l0::stm32l0x1 as pac;
#[cfg(all(feature = "stm32l0x2", not(feature = "stm32l0x1")))]
pub use stm32l0::stm32l0x2 as pac;
#[cfg(all(
    feature = "stm32l0x3",
    not(any(feature = "stm32l0x1", feature = "stm32l0x2"))
))]
pub use stm32l0::stm32l0x3 as pac;

#[cfg(not(any(feature = "stm32l0x1", feature = "stm32l0x2", feature = "stm32l0x3")))]
compile_error!("select a device family: stm32l0x1, stm32l0x2 or stm32l0x3");
