//! Addressing-mode results.

/// Where an instruction's operand lives.
///
/// Implied and accumulator modes produce no address; everything else
/// (including immediate, whose "address" is the operand byte in the
/// instruction stream) resolves to a 16-bit location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectiveAddress {
    /// Operand is a register (or there is none).
    #[default]
    None,
    /// Operand lives in memory at this address.
    Address(u16),
}

impl EffectiveAddress {
    /// The address, if the mode produced one.
    #[must_use]
    pub const fn address(self) -> Option<u16> {
        match self {
            Self::None => None,
            Self::Address(addr) => Some(addr),
        }
    }
}

/// An effective address plus the timing facts the resolver learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Operand {
    pub address: EffectiveAddress,
    /// Indexing carried into the high byte of the address.
    pub page_crossed: bool,
}

impl Operand {
    /// No address, no penalty.
    pub const NONE: Self = Self {
        address: EffectiveAddress::None,
        page_crossed: false,
    };

    #[must_use]
    pub const fn at(address: u16) -> Self {
        Self {
            address: EffectiveAddress::Address(address),
            page_crossed: false,
        }
    }

    /// Indexed address; `base` is the unindexed address used for the page test.
    #[must_use]
    pub const fn indexed(base: u16, address: u16) -> Self {
        Self {
            address: EffectiveAddress::Address(address),
            page_crossed: crosses_page(base, address),
        }
    }
}

/// True if `a` and `b` lie on different 256-byte pages.
#[must_use]
pub const fn crosses_page(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
