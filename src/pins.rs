//! Board pin table.

use crate::error::Error;

/// GPIO ports present on every STM32L0 family member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
    C,
}

impl Port {
    /// This port's enable bit in RCC_IOPENR.
    pub const fn clock_enable_mask(self) -> u32 {
        match self {
            Port::A => 1 << 0,
            Port::B => 1 << 1,
            Port::C => 1 << 2,
        }
    }
}

/// Physical location of one GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDescriptor {
    pub port: Port,
    /// Bit position in the port registers, 0-15.
    pub bit: u8,
    /// Bit that must be set in RCC_IOPENR before the port registers respond.
    pub clock_enable_mask: u32,
}

impl PinDescriptor {
    const fn new(port: Port, bit: u8) -> Self {
        Self {
            port,
            bit,
            clock_enable_mask: port.clock_enable_mask(),
        }
    }

    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }
}

/// Every pin the board exposes. The discriminant is the pin's handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Pin {
    Pa6 = 0,
    Pa4 = 1,
}

pub const PIN_COUNT: usize = 2;

static PINS: [PinDescriptor; PIN_COUNT] = [
    PinDescriptor::new(Port::A, 6), // Pa6
    PinDescriptor::new(Port::A, 4), // Pa4
];

impl Pin {
    pub const ALL: [Pin; PIN_COUNT] = [Pin::Pa6, Pin::Pa4];

    pub const fn handle(self) -> Handle {
        Handle(self as u8)
    }

    pub fn descriptor(self) -> &'static PinDescriptor {
        &PINS[self as usize]
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Error> {
        Pin::ALL
            .get(raw as usize)
            .copied()
            .ok_or(Error::InvalidHandle)
    }
}

/// Opaque pin handle. Built from a [`Pin`] it is always valid; built from a
/// raw integer it is checked on every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(u8);

impl Handle {
    pub const fn from_raw(raw: u8) -> Self {
        Handle(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl From<Pin> for Handle {
    fn from(pin: Pin) -> Self {
        pin.handle()
    }
}

/// Looks up a handle in the board table. Out-of-range handles are rejected.
pub fn lookup(handle: Handle) -> Result<&'static PinDescriptor, Error> {
    PINS.get(handle.0 as usize).ok_or(Error::InvalidHandle)
}
