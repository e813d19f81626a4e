//! Millisecond time base and the sleeping delay built on it.

use core::sync::atomic::{AtomicU32, Ordering};

/// Ticks since SysTick was armed. Incremented by the SysTick handler only.
pub static TICKS: TickCounter = TickCounter::new();

pub struct TickCounter {
    ticks: AtomicU32,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(value: u32) -> Self {
        Self {
            ticks: AtomicU32::new(value),
        }
    }

    pub fn now(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Advances the count by one, wrapping at `u32::MAX`.
    ///
    /// Must only be called from the tick interrupt. Cortex-M0+ has no atomic
    /// read-modify-write, so this is a plain load and store; with a single
    /// writer no increment can be lost.
    pub fn increment(&self) {
        let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(next, Ordering::Relaxed);
    }

    /// Ticks elapsed since `since`, correct across one wrap of the counter.
    pub fn elapsed_since(&self, since: u32) -> u32 {
        self.now().wrapping_sub(since)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-power wait until the next interrupt.
pub trait Sleep {
    fn wait_for_interrupt(&mut self);
}

/// Sleeps with the WFI instruction.
#[derive(Debug, Default)]
pub struct Wfi;

impl Sleep for Wfi {
    fn wait_for_interrupt(&mut self) {
        cortex_m::asm::wfi();
    }
}

/// Blocks until `duration` ticks of `ticks` have elapsed.
///
/// The core sleeps between checks and wakes on any interrupt, so elapsed time
/// is re-read after every wake. A `duration` of zero returns without
/// sleeping. Durations longer than one wrap of the counter are not supported.
pub fn delay<S: Sleep>(ticks: &TickCounter, sleep: &mut S, duration: u32) {
    let start = ticks.now();
    while ticks.elapsed_since(start) < duration {
        sleep.wait_for_interrupt();
    }
}

#[cfg(feature = "rt")]
use cortex_m_rt::exception;

#[cfg(feature = "rt")]
#[exception]
fn SysTick() {
    TICKS.increment();
}
