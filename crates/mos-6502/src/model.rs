//! CPU variant/capability definitions for the 6502 family.
//!
//! Every variant shares the documented NMOS instruction set; the capability
//! set gates the few behaviours that differ between parts.

/// Selected 6502-family part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// MOS 6502 (NMOS).
    #[default]
    Nmos6502,
    /// Ricoh 2A03/2A07, the NES CPU core. Decimal mode is wired off.
    Ricoh2A03,
}

/// Capability flags for a specific variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// ADC/SBC honour the D flag with BCD arithmetic.
    pub decimal_mode: bool,
}

impl Variant {
    /// Static capability set for this variant.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Nmos6502 => Capabilities { decimal_mode: true },
            Self::Ricoh2A03 => Capabilities {
                decimal_mode: false,
            },
        }
    }

    /// Convenience helper for ADC/SBC.
    #[must_use]
    pub const fn supports_decimal(self) -> bool {
        self.capabilities().decimal_mode
    }
}
