//! Arithmetic and logic primitives.
//!
//! Every function takes the register file for its flag side effects. The
//! accumulator is passed in and the result handed back, because most 6800
//! operations exist for A, B and memory alike.

use crate::Registers;

/// ADD/ADC/ABA.
///
/// H is the carry out of bit 3 of the low-nibble sum, carry-in included.
pub fn add(regs: &mut Registers, acc: u8, value: u8, carry: bool) -> u8 {
    let carry = u16::from(carry);
    let sum = u16::from(acc) + u16::from(value) + carry;
    let result = sum as u8;

    regs.h = u16::from(acc & 0x0F) + u16::from(value & 0x0F) + carry > 0x0F;
    regs.c = sum > 0xFF;
    regs.v = (acc ^ result) & (value ^ result) & 0x80 != 0;
    regs.update_nz(result);
    result
}

/// SUB/SBC/SBA/CMP/CBA. C is set on borrow. H is untouched.
pub fn sub(regs: &mut Registers, acc: u8, value: u8, borrow: bool) -> u8 {
    let borrow = u16::from(borrow);
    let result = u16::from(acc)
        .wrapping_sub(u16::from(value))
        .wrapping_sub(borrow) as u8;

    regs.c = u16::from(value) + borrow > u16::from(acc);
    regs.v = (acc ^ value) & (acc ^ result) & 0x80 != 0;
    regs.update_nz(result);
    result
}

/// AND/BIT.
pub fn and(regs: &mut Registers, acc: u8, value: u8) -> u8 {
    load(regs, acc & value)
}

/// ORA.
pub fn ora(regs: &mut Registers, acc: u8, value: u8) -> u8 {
    load(regs, acc | value)
}

/// EOR.
pub fn eor(regs: &mut Registers, acc: u8, value: u8) -> u8 {
    load(regs, acc ^ value)
}

/// LDA/STA/TAB/TBA: N and Z from the value, V cleared.
pub fn load(regs: &mut Registers, value: u8) -> u8 {
    regs.update_nz(value);
    regs.v = false;
    value
}

/// TST: N and Z from the value, V and C cleared.
pub fn test(regs: &mut Registers, value: u8) {
    load(regs, value);
    regs.c = false;
}

/// CLR.
pub fn clear(regs: &mut Registers) -> u8 {
    regs.n = false;
    regs.z = true;
    regs.v = false;
    regs.c = false;
    0
}

/// COM: one's complement, C always set.
pub fn complement(regs: &mut Registers, value: u8) -> u8 {
    let result = load(regs, !value);
    regs.c = true;
    result
}

/// NEG: two's complement. V only for $80, C unless the result is zero.
pub fn negate(regs: &mut Registers, value: u8) -> u8 {
    let result = 0u8.wrapping_sub(value);
    regs.update_nz(result);
    regs.v = result == 0x80;
    regs.c = result != 0;
    result
}

/// INC: V when $7F wraps to $80. C untouched.
pub fn inc(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    regs.update_nz(result);
    regs.v = value == 0x7F;
    result
}

/// DEC: V when $80 wraps to $7F. C untouched.
pub fn dec(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    regs.update_nz(result);
    regs.v = value == 0x80;
    result
}

// Shifts and rotates all set V = N xor C after the operation.
fn finish_shift(regs: &mut Registers, result: u8, carry: bool) -> u8 {
    regs.c = carry;
    regs.update_nz(result);
    regs.v = regs.n ^ regs.c;
    result
}

/// ASL.
pub fn asl(regs: &mut Registers, value: u8) -> u8 {
    finish_shift(regs, value << 1, value & 0x80 != 0)
}

/// ASR: bit 7 is preserved.
pub fn asr(regs: &mut Registers, value: u8) -> u8 {
    finish_shift(regs, (value >> 1) | (value & 0x80), value & 0x01 != 0)
}

/// LSR.
pub fn lsr(regs: &mut Registers, value: u8) -> u8 {
    finish_shift(regs, value >> 1, value & 0x01 != 0)
}

/// ROL through carry.
pub fn rol(regs: &mut Registers, value: u8) -> u8 {
    let result = (value << 1) | u8::from(regs.c);
    finish_shift(regs, result, value & 0x80 != 0)
}

/// ROR through carry.
pub fn ror(regs: &mut Registers, value: u8) -> u8 {
    let result = (value >> 1) | (u8::from(regs.c) << 7);
    finish_shift(regs, result, value & 0x01 != 0)
}

/// DAA: BCD-correct A after an ADD/ADC/ABA using H and C.
///
/// C is only ever set here, never cleared. V is cleared.
pub fn daa(regs: &mut Registers, acc: u8) -> u8 {
    let msn = acc & 0xF0;
    let lsn = acc & 0x0F;

    let mut correction: u16 = 0;
    if lsn > 0x09 || regs.h {
        correction |= 0x06;
    }
    if msn > 0x80 && lsn > 0x09 {
        correction |= 0x60;
    }
    if msn > 0x90 || regs.c {
        correction |= 0x60;
    }

    let sum = u16::from(acc) + correction;
    let result = sum as u8;
    regs.update_nz(result);
    regs.v = false;
    regs.c |= sum > 0xFF;
    result
}

/// CPX: 16-bit compare. C is untouched.
pub fn compare16(regs: &mut Registers, reg: u16, value: u16) {
    let result = reg.wrapping_sub(value);
    regs.update_nz16(result);
    regs.v = (reg ^ value) & (reg ^ result) & 0x8000 != 0;
}

/// LDX/LDS/STX/STS: N from bit 15, Z, V cleared.
pub fn load16(regs: &mut Registers, value: u16) -> u16 {
    regs.update_nz16(value);
    regs.v = false;
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_zero_flag_uses_masked_sum() {
        for a in 0..=255u8 {
            for m in 0..=255u8 {
                for carry in [false, true] {
                    let mut regs = Registers::new();
                    add(&mut regs, a, m, carry);
                    let expected = (u16::from(a) + u16::from(m) + u16::from(carry)) & 0xFF == 0;
                    assert_eq!(regs.z, expected, "a={a:02X} m={m:02X} c={carry}");
                }
            }
        }
    }

    #[test]
    fn add_half_carry() {
        let mut regs = Registers::new();
        assert_eq!(add(&mut regs, 0x0F, 0x01, false), 0x10);
        assert!(regs.h);
        assert!(!regs.c);

        assert_eq!(add(&mut regs, 0x07, 0x08, true), 0x10);
        assert!(regs.h, "carry-in counts toward H");

        add(&mut regs, 0x10, 0x10, false);
        assert!(!regs.h);
    }

    #[test]
    fn add_overflow_and_carry() {
        let mut regs = Registers::new();
        assert_eq!(add(&mut regs, 0x7F, 0x01, false), 0x80);
        assert!(regs.v && regs.n && !regs.c);

        assert_eq!(add(&mut regs, 0x80, 0x80, false), 0x00);
        assert!(regs.c && regs.v && regs.z);
    }

    #[test]
    fn sub_borrow_and_overflow() {
        let mut regs = Registers::new();
        assert_eq!(sub(&mut regs, 0x10, 0x20, false), 0xF0);
        assert!(regs.c, "borrow");
        assert!(regs.n);

        assert_eq!(sub(&mut regs, 0x80, 0x01, false), 0x7F);
        assert!(regs.v);
        assert!(!regs.c);

        assert_eq!(sub(&mut regs, 0x05, 0x04, true), 0x00);
        assert!(regs.z && !regs.c);
    }

    #[test]
    fn neg_and_com() {
        let mut regs = Registers::new();
        assert_eq!(negate(&mut regs, 0x01), 0xFF);
        assert!(regs.c && regs.n && !regs.v);

        assert_eq!(negate(&mut regs, 0x80), 0x80);
        assert!(regs.v);

        assert_eq!(negate(&mut regs, 0x00), 0x00);
        assert!(!regs.c && regs.z);

        assert_eq!(complement(&mut regs, 0xF0), 0x0F);
        assert!(regs.c && !regs.v && !regs.n);
    }

    #[test]
    fn clear_and_test() {
        let mut regs = Registers::new();
        regs.set_cc(0xFF);
        assert_eq!(clear(&mut regs), 0);
        assert!(regs.z && !regs.n && !regs.v && !regs.c);
        assert!(regs.h && regs.i, "CLR leaves H and I");

        regs.c = true;
        regs.v = true;
        test(&mut regs, 0x80);
        assert!(regs.n && !regs.z && !regs.v && !regs.c);
    }

    #[test]
    fn shifts_set_v_from_n_xor_c() {
        let mut regs = Registers::new();
        assert_eq!(asl(&mut regs, 0x40), 0x80);
        assert!(regs.n && !regs.c && regs.v);

        assert_eq!(asr(&mut regs, 0x81), 0xC0);
        assert!(regs.c && regs.n && !regs.v);

        assert_eq!(lsr(&mut regs, 0x01), 0x00);
        assert!(regs.c && regs.z && regs.v);

        regs.c = true;
        assert_eq!(ror(&mut regs, 0x00), 0x80);
        assert!(!regs.c && regs.n);

        regs.c = true;
        assert_eq!(rol(&mut regs, 0x80), 0x01);
        assert!(regs.c && !regs.n && regs.v);
    }

    #[test]
    fn inc_dec_overflow_edges() {
        let mut regs = Registers::new();
        regs.c = true;
        assert_eq!(inc(&mut regs, 0x7F), 0x80);
        assert!(regs.v && regs.c);
        assert_eq!(dec(&mut regs, 0x80), 0x7F);
        assert!(regs.v);
        assert_eq!(dec(&mut regs, 0x01), 0x00);
        assert!(regs.z && !regs.v);
    }

    #[test]
    fn daa_corrects_bcd_sums() {
        let mut regs = Registers::new();
        // 0x19 + 0x28 = 0x41, H set -> 0x47
        let sum = add(&mut regs, 0x19, 0x28, false);
        assert_eq!(daa(&mut regs, sum), 0x47);
        assert!(!regs.c);

        // 0x99 + 0x01 = 0x9A -> 0x00 with carry
        let sum = add(&mut regs, 0x99, 0x01, false);
        assert_eq!(daa(&mut regs, sum), 0x00);
        assert!(regs.c && regs.z);

        // 0x50 + 0x50 = 0xA0 -> 0x00 with carry
        let sum = add(&mut regs, 0x50, 0x50, false);
        assert_eq!(daa(&mut regs, sum), 0x00);
        assert!(regs.c);
    }

    #[test]
    fn sixteen_bit_compare_and_load() {
        let mut regs = Registers::new();
        regs.c = true;
        compare16(&mut regs, 0x1234, 0x1234);
        assert!(regs.z && regs.c, "CPX leaves C");

        compare16(&mut regs, 0x8000, 0x0001);
        assert!(regs.v && !regs.n);

        assert_eq!(load16(&mut regs, 0x8000), 0x8000);
        assert!(regs.n && !regs.z && !regs.v);
    }
}
