//! Arithmetic and logic primitives.
//!
//! Each operation takes the register file for its flag side effects plus an
//! operand byte. Operations that produce a value return it; the caller
//! decides whether it lands in a register or in memory.

use crate::Registers;

/// ADC - add memory and carry to A.
///
/// `decimal` says whether the part honours the D flag at all.
pub fn adc(regs: &mut Registers, value: u8, decimal: bool) {
    if decimal && regs.d {
        adc_decimal(regs, value);
    } else {
        adc_binary(regs, value);
    }
}

fn adc_binary(regs: &mut Registers, value: u8) {
    let sum = u16::from(regs.a) + u16::from(value) + u16::from(regs.c);
    let result = sum as u8;

    regs.c = sum > 0xFF;
    regs.v = (regs.a ^ result) & (value ^ result) & 0x80 != 0;
    regs.update_nz(result);
    regs.a = result;
}

// NMOS BCD: Z comes from the binary sum, N and V from the intermediate
// result before the high nibble is adjusted.
fn adc_decimal(regs: &mut Registers, value: u8) {
    let a = u16::from(regs.a);
    let v = u16::from(value);
    let c = u16::from(regs.c);

    let mut low = (a & 0x0F) + (v & 0x0F) + c;
    if low > 9 {
        low += 6;
    }

    let mut high = (a >> 4) + (v >> 4) + u16::from(low > 0x0F);

    let binary = (a + v + c) as u8;
    let intermediate = ((high << 4) | (low & 0x0F)) as u8;
    regs.z = binary == 0;
    regs.n = intermediate & 0x80 != 0;
    regs.v = (regs.a ^ intermediate) & (value ^ intermediate) & 0x80 != 0;

    if high > 9 {
        high += 6;
    }

    regs.c = high > 0x0F;
    regs.a = ((high << 4) | (low & 0x0F)) as u8;
}

/// SBC - subtract memory and borrow from A.
pub fn sbc(regs: &mut Registers, value: u8, decimal: bool) {
    if decimal && regs.d {
        sbc_decimal(regs, value);
    } else {
        adc_binary(regs, !value);
    }
}

// NMOS BCD: every flag comes from the binary difference.
fn sbc_decimal(regs: &mut Registers, value: u8) {
    let a = i16::from(regs.a);
    let v = i16::from(value);
    let borrow = i16::from(!regs.c);

    let mut low = (a & 0x0F) - (v & 0x0F) - borrow;
    if low < 0 {
        low = ((low - 6) & 0x0F) - 0x10;
    }

    let mut high = (a >> 4) - (v >> 4) + if low < 0 { -1 } else { 0 };
    if high < 0 {
        high = (high - 6) & 0x0F;
    }

    let binary = a - v - borrow;
    let result8 = binary as u8;
    regs.c = binary >= 0;
    regs.v = (regs.a ^ value) & (regs.a ^ result8) & 0x80 != 0;
    regs.update_nz(result8);

    regs.a = ((high << 4) | (low & 0x0F)) as u8;
}

/// CMP/CPX/CPY - subtract without storing. C means no borrow.
pub fn compare(regs: &mut Registers, register: u8, value: u8) {
    regs.c = register >= value;
    regs.update_nz(register.wrapping_sub(value));
}

/// AND into A.
pub fn and(regs: &mut Registers, value: u8) {
    regs.a &= value;
    regs.update_nz(regs.a);
}

/// OR into A.
pub fn ora(regs: &mut Registers, value: u8) {
    regs.a |= value;
    regs.update_nz(regs.a);
}

/// Exclusive OR into A.
pub fn eor(regs: &mut Registers, value: u8) {
    regs.a ^= value;
    regs.update_nz(regs.a);
}

/// BIT - Z from `A & M`; N and V copied from bits 7 and 6 of M.
pub fn bit(regs: &mut Registers, value: u8) {
    regs.z = regs.a & value == 0;
    regs.n = value & 0x80 != 0;
    regs.v = value & 0x40 != 0;
}

/// ASL - arithmetic shift left.
pub fn asl(regs: &mut Registers, value: u8) -> u8 {
    regs.c = value & 0x80 != 0;
    let result = value << 1;
    regs.update_nz(result);
    result
}

/// LSR - logical shift right.
pub fn lsr(regs: &mut Registers, value: u8) -> u8 {
    regs.c = value & 0x01 != 0;
    let result = value >> 1;
    regs.update_nz(result);
    result
}

/// ROL - rotate left through carry.
pub fn rol(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = u8::from(regs.c);
    regs.c = value & 0x80 != 0;
    let result = (value << 1) | carry_in;
    regs.update_nz(result);
    result
}

/// ROR - rotate right through carry.
pub fn ror(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = u8::from(regs.c) << 7;
    regs.c = value & 0x01 != 0;
    let result = (value >> 1) | carry_in;
    regs.update_nz(result);
    result
}

/// Increment; C and V untouched.
pub fn inc(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    regs.update_nz(result);
    result
}

/// Decrement; C and V untouched.
pub fn dec(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    regs.update_nz(result);
    result
}

/// Loads and flag-setting transfers: pass the value through, setting N and Z.
pub fn load(regs: &mut Registers, value: u8) -> u8 {
    regs.update_nz(value);
    value
}
