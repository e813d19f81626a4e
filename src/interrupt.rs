//! Interrupt masking for multi-step register updates.

/// Global interrupt mask control.
pub trait InterruptControl {
    /// Masks interrupts and reports whether they were enabled before.
    fn disable(&mut self) -> bool;

    /// Unmasks interrupts if `was_enabled`, otherwise leaves them masked.
    fn restore(&mut self, was_enabled: bool);
}

/// PRIMASK based control for the running core.
#[derive(Debug, Default)]
pub struct CortexM;

impl InterruptControl for CortexM {
    fn disable(&mut self) -> bool {
        let was_enabled = cortex_m::register::primask::read().is_active();
        cortex_m::interrupt::disable();
        was_enabled
    }

    fn restore(&mut self, was_enabled: bool) {
        if was_enabled {
            // Only re-enables what `disable` found enabled.
            unsafe { cortex_m::interrupt::enable() }
        }
    }
}

/// Interrupts stay masked while this guard lives. Dropping it restores the
/// state found on entry, so nesting and early returns are safe.
pub struct CriticalSection<'a, I: InterruptControl> {
    control: &'a mut I,
    was_enabled: bool,
}

impl<'a, I: InterruptControl> CriticalSection<'a, I> {
    pub fn enter(control: &'a mut I) -> Self {
        let was_enabled = control.disable();
        Self {
            control,
            was_enabled,
        }
    }
}

impl<I: InterruptControl> Drop for CriticalSection<'_, I> {
    fn drop(&mut self) {
        self.control.restore(self.was_enabled);
    }
}
