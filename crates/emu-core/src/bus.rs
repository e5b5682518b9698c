//! Memory bus interface.

/// Size of the 16-bit address space.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Memory bus interface.
///
/// CPUs read instructions and data through this trait. The bus is owned by
/// the host and lent to the CPU for the duration of each tick, so the CPU
/// never holds on to it between cycles.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Flat 64KB RAM with no mapped devices.
///
/// Every address is plain read/write storage. Useful for tests and for hosts
/// that don't need memory-mapped I/O.
#[derive(Clone)]
pub struct SimpleBus {
    ram: Box<[u8; ADDRESS_SPACE]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimpleBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleBus").finish_non_exhaustive()
    }
}

impl SimpleBus {
    /// Create a bus with all 64KB cleared to zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Create a bus whose memory starts with `data`, copied from address 0.
    ///
    /// Bytes beyond the 64KB space are ignored.
    #[must_use]
    pub fn with_data(data: &[u8]) -> Self {
        let mut bus = Self::new();
        let len = data.len().min(ADDRESS_SPACE);
        bus.ram[..len].copy_from_slice(&data[..len]);
        bus
    }

    /// Copy `data` into memory starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.ram[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read a byte without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    /// Write a byte without going through the `Bus` trait.
    pub fn poke(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address)] = value;
    }

    /// The whole address space.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.ram[..]
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address)] = value;
    }
}
