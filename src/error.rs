use std::error::Error;
use std::fmt;

/// The two process-fatal error kinds the core can raise. Everything else
/// (unknown trap vectors, malformed image contents) is defined behavior,
/// not an error - see the loader and trap service.
#[derive(Debug)]
pub enum EmulatorError {
    /// RTI (0x8) or RES (0xD) was fetched. Both are architecturally
    /// privileged or reserved and have no meaning in this user-mode
    /// emulator.
    FatalOpcode { opcode: u16, pc: u16 },
}

impl fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmulatorError::FatalOpcode { opcode, pc } => write!(
                f,
                "fatal opcode {:#06x} at address {:#06x}: RTI/RES are unimplemented",
                opcode, pc
            ),
        }
    }
}

impl Error for EmulatorError {}
