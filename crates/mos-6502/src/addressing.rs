//! 6502 addressing modes.
//!
//! The 6502 has 13 addressing modes:
//! - Implied: No operand (e.g., CLC, RTS)
//! - Accumulator: Operates on A register (e.g., ASL A)
//! - Immediate: #$nn (the operand byte itself)
//! - Zero Page: $nn (8-bit address in page zero)
//! - Zero Page,X: $nn,X (8-bit address + X, wraps in page zero)
//! - Zero Page,Y: $nn,Y (8-bit address + Y, wraps in page zero)
//! - Absolute: $nnnn (16-bit address)
//! - Absolute,X: $nnnn,X (16-bit address + X, may cross page)
//! - Absolute,Y: $nnnn,Y (16-bit address + Y, may cross page)
//! - Indirect: ($nnnn) (JMP only, buggy page boundary behavior)
//! - Indexed Indirect: ($nn,X) (pointer in zero page indexed by X)
//! - Indirect Indexed: ($nn),Y (zero page pointer + Y)
//! - Relative: Branch offset (-128 to +127)

use emu_core::{Bus, Operand};

use crate::{AddressingMode, Mos6502};

impl Mos6502 {
    /// Fetch the next byte at PC and increment PC.
    pub(crate) fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit word (little-endian) at PC.
    pub(crate) fn fetch_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.fetch(bus);
        let high = self.fetch(bus);
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word from memory (little-endian).
    pub fn read_word(bus: &mut impl Bus, addr: u16) -> u16 {
        let low = bus.read(addr);
        let high = bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word with 6502 page boundary bug (for indirect JMP).
    /// If addr is $xxFF, high byte comes from $xx00 instead of $xx00+$100.
    fn read_word_page_bug(bus: &mut impl Bus, addr: u16) -> u16 {
        let low = bus.read(addr);
        let high_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let high = bus.read(high_addr);
        u16::from_le_bytes([low, high])
    }

    /// Read a pointer from zero page; the high byte wraps within page zero.
    fn read_zero_page_word(bus: &mut impl Bus, ptr: u8) -> u16 {
        let low = bus.read(u16::from(ptr));
        let high = bus.read(u16::from(ptr.wrapping_add(1)));
        u16::from_le_bytes([low, high])
    }

    /// Push a byte onto the stack.
    pub fn push(&mut self, bus: &mut impl Bus, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    /// Pull a byte from the stack.
    pub fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    /// Push a 16-bit word onto the stack (high byte first).
    pub fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    /// Pull a 16-bit word from the stack (low byte first).
    pub fn pull_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.pull(bus);
        let high = self.pull(bus);
        u16::from_le_bytes([low, high])
    }

    /// Consume the operand bytes for `mode` and produce the effective address.
    ///
    /// Immediate mode yields the address of the operand byte, so every
    /// value-reading instruction reads through the bus the same way. Relative
    /// mode yields the branch target, flagged as page-crossed when it lies on
    /// a different page than the next instruction.
    pub(crate) fn resolve(&mut self, mode: AddressingMode, bus: &mut impl Bus) -> Operand {
        match mode {
            AddressingMode::Implied | AddressingMode::Accumulator => Operand::NONE,
            AddressingMode::Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                Operand::at(addr)
            }
            AddressingMode::ZeroPage => Operand::at(u16::from(self.fetch(bus))),
            AddressingMode::ZeroPageX => {
                let base = self.fetch(bus);
                Operand::at(u16::from(base.wrapping_add(self.regs.x)))
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch(bus);
                Operand::at(u16::from(base.wrapping_add(self.regs.y)))
            }
            AddressingMode::Absolute => Operand::at(self.fetch_word(bus)),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(bus);
                Operand::indexed(base, base.wrapping_add(u16::from(self.regs.x)))
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(bus);
                Operand::indexed(base, base.wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word(bus);
                Operand::at(Self::read_word_page_bug(bus, ptr))
            }
            AddressingMode::IndexedIndirect => {
                let ptr = self.fetch(bus).wrapping_add(self.regs.x);
                Operand::at(Self::read_zero_page_word(bus, ptr))
            }
            AddressingMode::IndirectIndexed => {
                let ptr = self.fetch(bus);
                let base = Self::read_zero_page_word(bus, ptr);
                Operand::indexed(base, base.wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::Relative => {
                let offset = self.fetch(bus) as i8;
                let next = self.regs.pc;
                Operand::indexed(next, next.wrapping_add(offset as u16))
            }
        }
    }
}
