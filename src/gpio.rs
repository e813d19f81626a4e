//! Pin configuration and digital I/O.

use crate::error::Error;
use crate::interrupt::{CriticalSection, InterruptControl};
use crate::pins::{self, Handle, PinDescriptor};
use crate::regs::{Field, Register, RegisterFile};

// MODER encodings
const MODE_INPUT: u32 = 0b00;
const MODE_OUTPUT: u32 = 0b01;
const MODE_ALTERNATE: u32 = 0b10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Floating,
    Up,
    Down,
}

impl Pull {
    /// PUPDR encoding.
    pub const fn bits(self) -> u32 {
        match self {
            Pull::Floating => 0b00,
            Pull::Up => 0b01,
            Pull::Down => 0b10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    PushPull,
    OpenDrain,
}

impl OutputType {
    /// OTYPER encoding.
    pub const fn bits(self) -> u32 {
        match self {
            OutputType::PushPull => 0,
            OutputType::OpenDrain => 1,
        }
    }
}

/// Output slew rate class, OSPEEDR encoding in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Speed {
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// The operable pin configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input(Pull),
    Output(OutputType),
}

impl PinMode {
    /// Decodes a raw mode code: 0 floating input, 1 pull-up input, 2
    /// pull-down input, 3 push-pull output, 4 open-drain output.
    pub fn from_raw(code: u8) -> Result<Self, Error> {
        match code {
            0 => Ok(PinMode::Input(Pull::Floating)),
            1 => Ok(PinMode::Input(Pull::Up)),
            2 => Ok(PinMode::Input(Pull::Down)),
            3 => Ok(PinMode::Output(OutputType::PushPull)),
            4 => Ok(PinMode::Output(OutputType::OpenDrain)),
            _ => Err(Error::InvalidMode),
        }
    }
}

/// Full output stage setup. `set_mode` always uses low speed and no
/// alternate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_type: OutputType,
    pub speed: Speed,
    /// Alternate function number 0-15. `None` selects general purpose output.
    pub alternate: Option<u8>,
}

impl OutputConfig {
    pub const fn general_purpose(output_type: OutputType) -> Self {
        Self {
            output_type,
            speed: Speed::Low,
            alternate: None,
        }
    }
}

/// GPIO driver over a register file, masking interrupts with `I` while a
/// pin is reconfigured.
pub struct Gpio<R, I> {
    regs: R,
    irq: I,
}

impl<R: RegisterFile, I: InterruptControl> Gpio<R, I> {
    pub fn new(regs: R, irq: I) -> Self {
        Self { regs, irq }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    pub fn free(self) -> (R, I) {
        (self.regs, self.irq)
    }

    /// Puts a pin into `mode`, enabling its port clock first.
    ///
    /// An invalid handle is rejected before any register is touched.
    pub fn set_mode(&mut self, handle: impl Into<Handle>, mode: PinMode) -> Result<(), Error> {
        let handle = handle.into();
        let pin = pins::lookup(handle)?;
        trace!("pin {} -> {:?}", handle.raw(), mode);

        match mode {
            PinMode::Input(pull) => {
                self.reconfigure(pin, |regs| input_mode(regs, pin, pull));
            }
            PinMode::Output(output_type) => {
                let config = OutputConfig::general_purpose(output_type);
                self.reconfigure(pin, |regs| output_mode(regs, pin, config));
            }
        }
        Ok(())
    }

    /// `set_mode` for raw handle and mode codes, see [`PinMode::from_raw`].
    /// Both are validated before any register access.
    pub fn set_mode_raw(&mut self, handle: u8, mode: u8) -> Result<(), Error> {
        let handle = Handle::from_raw(handle);
        pins::lookup(handle)?;
        let mode = PinMode::from_raw(mode)?;
        self.set_mode(handle, mode)
    }

    /// Output setup with explicit speed and alternate function routing.
    pub fn configure_output(
        &mut self,
        handle: impl Into<Handle>,
        config: OutputConfig,
    ) -> Result<(), Error> {
        let pin = pins::lookup(handle.into())?;
        if config.alternate.is_some_and(|af| af > 15) {
            return Err(Error::InvalidMode);
        }
        self.reconfigure(pin, |regs| output_mode(regs, pin, config));
        Ok(())
    }

    /// Level on the pin's input data bit.
    ///
    /// On a pin configured as output this reads back the level being driven.
    pub fn read(&self, handle: impl Into<Handle>) -> Result<bool, Error> {
        let pin = pins::lookup(handle.into())?;
        Ok(self.regs.field(Register::Idr(pin.port), Field::bit(pin.bit)) != 0)
    }

    /// Drives the pin through the set/reset registers. Other pins on the
    /// port are never written, so no masking is needed.
    pub fn write(&mut self, handle: impl Into<Handle>, high: bool) -> Result<(), Error> {
        let pin = pins::lookup(handle.into())?;
        if high {
            self.regs.write(Register::Bsrr(pin.port), pin.mask());
        } else {
            self.regs.write(Register::Brr(pin.port), pin.mask());
        }
        Ok(())
    }

    /// Inverts the driven level.
    pub fn toggle(&mut self, handle: impl Into<Handle>) -> Result<(), Error> {
        let handle = handle.into();
        let pin = pins::lookup(handle)?;
        let driven = self.regs.field(Register::Odr(pin.port), Field::bit(pin.bit)) != 0;
        self.write(handle, !driven)
    }

    fn reconfigure(&mut self, pin: &PinDescriptor, update: impl FnOnce(&mut R)) {
        let _cs = CriticalSection::enter(&mut self.irq);
        self.regs.set_bits(Register::ClockEnable, pin.clock_enable_mask);
        update(&mut self.regs);
    }
}

fn input_mode<R: RegisterFile>(regs: &mut R, pin: &PinDescriptor, pull: Pull) {
    let field = Field::pair(pin.bit);
    regs.modify(Register::Moder(pin.port), field, MODE_INPUT);
    regs.modify(Register::Pupdr(pin.port), field, pull.bits());
}

fn output_mode<R: RegisterFile>(regs: &mut R, pin: &PinDescriptor, config: OutputConfig) {
    let field = Field::pair(pin.bit);
    regs.modify(
        Register::Otyper(pin.port),
        Field::bit(pin.bit),
        config.output_type.bits(),
    );
    match config.alternate {
        Some(af) => {
            let afr = if pin.bit < 8 {
                Register::Afrl(pin.port)
            } else {
                Register::Afrh(pin.port)
            };
            regs.modify(afr, Field::nibble(pin.bit), af as u32);
            regs.modify(Register::Moder(pin.port), field, MODE_ALTERNATE);
        }
        None => regs.modify(Register::Moder(pin.port), field, MODE_OUTPUT),
    }
    regs.modify(Register::Ospeedr(pin.port), field, config.speed.bits());
}
