//! Register-level access used by the GPIO and clock code.

use crate::pins::Port;

/// One 32-bit peripheral register the board code touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// RCC_CR
    RccCr,
    /// RCC_ICSCR
    RccIcscr,
    /// RCC_CFGR
    RccCfgr,
    /// RCC_IOPENR, one clock-enable bit per GPIO port.
    ClockEnable,
    Moder(Port),
    Otyper(Port),
    Ospeedr(Port),
    Pupdr(Port),
    /// Read only.
    Idr(Port),
    /// Read only here; outputs are driven through `Bsrr`/`Brr`.
    Odr(Port),
    /// Write only, write-1-to-set in the low half.
    Bsrr(Port),
    /// Write only, write-1-to-clear.
    Brr(Port),
    Afrl(Port),
    Afrh(Port),
}

/// A bit field inside a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    offset: u32,
    width: u32,
}

impl Field {
    pub const fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }

    /// 2-bit per-pin field (MODER, PUPDR, OSPEEDR).
    pub const fn pair(bit: u8) -> Self {
        Self::new(bit as u32 * 2, 2)
    }

    /// 1-bit per-pin field (OTYPER, IDR, ODR).
    pub const fn bit(bit: u8) -> Self {
        Self::new(bit as u32, 1)
    }

    /// 4-bit alternate function field, inside AFRL for pins 0-7 and AFRH
    /// for pins 8-15.
    pub const fn nibble(bit: u8) -> Self {
        Self::new((bit as u32 % 8) * 4, 4)
    }

    /// Field-width mask shifted to the field offset.
    pub const fn mask(&self) -> u32 {
        (u32::MAX >> (32 - self.width)) << self.offset
    }

    pub const fn extract(&self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.offset
    }

    /// Clears exactly this field in `reg` and places `value` in it.
    pub const fn insert(&self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask()) | ((value << self.offset) & self.mask())
    }
}

/// Raw register access. Implemented over the PAC on target and by a fake
/// register bank in tests.
pub trait RegisterFile {
    fn read(&self, reg: Register) -> u32;

    fn write(&mut self, reg: Register, value: u32);

    /// Read-modify-write that leaves every bit outside `field` untouched.
    fn modify(&mut self, reg: Register, field: Field, value: u32) {
        let current = self.read(reg);
        self.write(reg, field.insert(current, value));
    }

    /// OR `mask` into `reg`. Never clears bits.
    fn set_bits(&mut self, reg: Register, mask: u32) {
        let current = self.read(reg);
        self.write(reg, current | mask);
    }

    fn field(&self, reg: Register, field: Field) -> u32 {
        field.extract(self.read(reg))
    }
}
