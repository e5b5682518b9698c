//! 6800 addressing modes and stack access.
//!
//! - Inherent: operands implied by the opcode
//! - Immediate: #$nn, or #$nnnn for the 16-bit loads and CPX
//! - Direct: $nn (page zero)
//! - Indexed: $nn,X (unsigned offset + IX, wraps at 16 bits)
//! - Extended: $nnnn (high byte first)
//! - Relative: branch offset (-128 to +127)

use emu_core::{Bus, Operand};

use crate::{AddressingMode, Mc6800};

impl Mc6800 {
    /// Fetch the next byte at PC and increment PC.
    pub(crate) fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit big-endian word at PC.
    pub(crate) fn fetch_word(&mut self, bus: &mut impl Bus) -> u16 {
        let high = self.fetch(bus);
        let low = self.fetch(bus);
        u16::from_be_bytes([high, low])
    }

    /// Read a big-endian word from memory.
    pub fn read_word(bus: &mut impl Bus, addr: u16) -> u16 {
        let high = bus.read(addr);
        let low = bus.read(addr.wrapping_add(1));
        u16::from_be_bytes([high, low])
    }

    /// Write a big-endian word to memory.
    pub fn write_word(bus: &mut impl Bus, addr: u16, value: u16) {
        let [high, low] = value.to_be_bytes();
        bus.write(addr, high);
        bus.write(addr.wrapping_add(1), low);
    }

    /// Push a byte: write at SP, then decrement.
    pub fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(self.regs.sp, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    /// Pull a byte: increment SP, then read.
    pub fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        bus.read(self.regs.sp)
    }

    /// Push a word low byte first, leaving it big-endian in memory.
    pub fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.push(bus, low);
        self.push(bus, high);
    }

    /// Pull a word high byte first.
    pub fn pull_word(&mut self, bus: &mut impl Bus) -> u16 {
        let high = self.pull(bus);
        let low = self.pull(bus);
        u16::from_be_bytes([high, low])
    }

    /// Consume the operand bytes for `mode` and produce the effective address.
    ///
    /// Immediate modes yield the address of the operand bytes. Relative mode
    /// yields the branch target.
    pub(crate) fn resolve(&mut self, mode: AddressingMode, bus: &mut impl Bus) -> Operand {
        match mode {
            AddressingMode::Inherent => Operand::NONE,
            AddressingMode::Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                Operand::at(addr)
            }
            AddressingMode::Immediate16 => {
                let addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(2);
                Operand::at(addr)
            }
            AddressingMode::Direct => Operand::at(u16::from(self.fetch(bus))),
            AddressingMode::Indexed => {
                let offset = self.fetch(bus);
                Operand::at(self.regs.ix.wrapping_add(u16::from(offset)))
            }
            AddressingMode::Extended => Operand::at(self.fetch_word(bus)),
            AddressingMode::Relative => {
                let offset = self.fetch(bus) as i8;
                Operand::at(self.regs.pc.wrapping_add(offset as u16))
            }
        }
    }
}
