//! Host-side stand-ins for the register bank, PRIMASK and WFI.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interrupt::InterruptControl;
use crate::pins::Port;
use crate::regs::{Field, Register, RegisterFile};
use crate::tick::{Sleep, TickCounter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(Register),
    Write(Register, u32),
    Disable,
    Restore(bool),
}

pub type Log = Rc<RefCell<Vec<Access>>>;

/// In-memory register bank with STM32 GPIO semantics: BSRR/BRR update ODR,
/// IDR returns ODR for output pins and the external level otherwise.
#[derive(Default)]
pub struct FakeRegisters {
    values: HashMap<Register, u32>,
    /// Level applied from outside, per port.
    pub inputs: HashMap<Port, u32>,
    pub log: Log,
}

impl FakeRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: Log) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Sets a register without recording an access.
    pub fn preset(&mut self, reg: Register, value: u32) {
        self.values.insert(reg, value);
    }

    /// Current value without recording an access.
    pub fn peek(&self, reg: Register) -> u32 {
        self.values.get(&reg).copied().unwrap_or(0)
    }

    pub fn writes(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|a| matches!(a, Access::Write(..)))
            .count()
    }

    pub fn accesses(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|a| matches!(a, Access::Read(_) | Access::Write(..)))
            .count()
    }

    fn output_mask(&self, port: Port) -> u32 {
        let moder = self.peek(Register::Moder(port));
        (0..16u8)
            .filter(|&bit| Field::pair(bit).extract(moder) == 0b01)
            .fold(0, |mask, bit| mask | 1 << bit)
    }
}

impl RegisterFile for FakeRegisters {
    fn read(&self, reg: Register) -> u32 {
        self.log.borrow_mut().push(Access::Read(reg));
        match reg {
            Register::Idr(port) => {
                let outputs = self.output_mask(port);
                let external = self.inputs.get(&port).copied().unwrap_or(0);
                ((external & !outputs) | (self.peek(Register::Odr(port)) & outputs)) & 0xFFFF
            }
            Register::Bsrr(_) | Register::Brr(_) => 0,
            _ => self.peek(reg),
        }
    }

    fn write(&mut self, reg: Register, value: u32) {
        self.log.borrow_mut().push(Access::Write(reg, value));
        match reg {
            Register::Bsrr(port) => {
                let odr = self.peek(Register::Odr(port));
                let odr = (odr | (value & 0xFFFF)) & !(value >> 16);
                self.values.insert(Register::Odr(port), odr);
            }
            Register::Brr(port) => {
                let odr = self.peek(Register::Odr(port)) & !(value & 0xFFFF);
                self.values.insert(Register::Odr(port), odr);
            }
            Register::Idr(_) | Register::Odr(_) => {}
            Register::Otyper(_) => {
                self.values.insert(reg, value & 0xFFFF);
            }
            _ => {
                self.values.insert(reg, value);
            }
        }
    }
}

pub struct FakeInterrupts {
    pub enabled: bool,
    pub disables: usize,
    pub restores: usize,
    pub log: Option<Log>,
}

impl Default for FakeInterrupts {
    fn default() -> Self {
        Self {
            enabled: true,
            disables: 0,
            restores: 0,
            log: None,
        }
    }
}

impl FakeInterrupts {
    pub fn with_log(log: Log) -> Self {
        Self {
            log: Some(log),
            ..Self::default()
        }
    }
}

impl InterruptControl for FakeInterrupts {
    fn disable(&mut self) -> bool {
        let was_enabled = self.enabled;
        self.enabled = false;
        self.disables += 1;
        if let Some(log) = &self.log {
            log.borrow_mut().push(Access::Disable);
        }
        was_enabled
    }

    fn restore(&mut self, was_enabled: bool) {
        self.enabled = was_enabled;
        self.restores += 1;
        if let Some(log) = &self.log {
            log.borrow_mut().push(Access::Restore(was_enabled));
        }
    }
}

/// Each wake is scripted: `true` means a tick interrupt woke the core,
/// `false` a spurious wake from some other interrupt. Once the script runs
/// out every wake is a tick.
pub struct TickingSleep<'a> {
    ticks: &'a TickCounter,
    script: Vec<bool>,
    pub wakes: usize,
}

impl<'a> TickingSleep<'a> {
    pub fn new(ticks: &'a TickCounter) -> Self {
        Self::scripted(ticks, Vec::new())
    }

    pub fn scripted(ticks: &'a TickCounter, script: Vec<bool>) -> Self {
        Self {
            ticks,
            script,
            wakes: 0,
        }
    }
}

impl Sleep for TickingSleep<'_> {
    fn wait_for_interrupt(&mut self) {
        let tick = self.script.get(self.wakes).copied().unwrap_or(true);
        self.wakes += 1;
        if tick {
            self.ticks.increment();
        }
    }
}
