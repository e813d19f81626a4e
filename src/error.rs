use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Pin handle outside the board pin table.
    InvalidHandle,
    /// Raw mode code that names no pin mode.
    InvalidMode,
    /// Core clock gives a SysTick reload of zero or wider than 24 bits.
    ReloadOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidHandle => f.write_str("pin handle out of range"),
            Error::InvalidMode => f.write_str("unknown pin mode"),
            Error::ReloadOutOfRange => f.write_str("systick reload out of range"),
        }
    }
}
