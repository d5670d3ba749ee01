use core::fmt;

/// Failures surfaced while bringing hart 0 up.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BootError {
    /// Clock/reset request named a context that is not a hart of this SoC.
    InvalidContext(u8),
    /// Baud rate is zero or cannot be reached from the peripheral clock.
    InvalidBaud(u32),
    /// Transmit attempted before `init`.
    UartNotInitialised,
}

pub type BootResult<T> = core::result::Result<T, BootError>;

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::InvalidContext(ctx) => write!(f, "invalid clock/reset context {}", ctx),
            BootError::InvalidBaud(baud) => write!(f, "unreachable baud rate {}", baud),
            BootError::UartNotInitialised => f.write_str("uart used before init"),
        }
    }
}
