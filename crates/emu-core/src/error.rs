//! Execution errors shared by every CPU core.

use thiserror::Error;

/// Why a CPU could not execute the instruction at `pc`.
///
/// Errors leave the CPU exactly as it was before the failing instruction:
/// registers are restored, nothing has been written to the bus, and the next
/// tick will attempt the same instruction again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The opcode byte has no entry in the CPU's opcode table.
    #[error("unknown opcode ${opcode:02X} at ${pc:04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },

    /// The decoded instruction needs an operand its addressing mode did not
    /// produce. This is a defect in the opcode table, never bad program data.
    #[error("{mnemonic} cannot use {mode} addressing (opcode ${opcode:02X} at ${pc:04X})")]
    InvalidAddressing {
        opcode: u8,
        pc: u16,
        mnemonic: String,
        mode: String,
    },
}

impl CpuError {
    /// Address of the opcode that failed.
    #[must_use]
    pub fn pc(&self) -> u16 {
        match self {
            Self::UnknownOpcode { pc, .. } | Self::InvalidAddressing { pc, .. } => *pc,
        }
    }

    /// The opcode byte that failed.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        match self {
            Self::UnknownOpcode { opcode, .. } | Self::InvalidAddressing { opcode, .. } => *opcode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_opcode_and_address() {
        let err = CpuError::UnknownOpcode {
            opcode: 0x02,
            pc: 0x8000,
        };
        assert_eq!(err.to_string(), "unknown opcode $02 at $8000");
        assert_eq!(err.pc(), 0x8000);
        assert_eq!(err.opcode(), 0x02);

        let err = CpuError::InvalidAddressing {
            opcode: 0x85,
            pc: 0x0200,
            mnemonic: "Sta".into(),
            mode: "Immediate".into(),
        };
        assert_eq!(
            err.to_string(),
            "Sta cannot use Immediate addressing (opcode $85 at $0200)"
        );
    }
}
