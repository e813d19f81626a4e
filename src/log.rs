// Logging goes to the debugger console over semihosting when the
// `semihosting` feature is on. Without a debugger attached semihosting halts
// the core, so it stays opt-in.

#[cfg(feature = "semihosting")]
macro_rules! trace {
    ($($arg:tt)*) => {{
        let _ = cortex_m_semihosting::hprintln!($($arg)*);
    }};
}

#[cfg(not(feature = "semihosting"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        if false {
            let _ = core::format_args!($($arg)*);
        }
    }};
}
