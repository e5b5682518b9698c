//! Unit tests for 6502 instruction behavior.

use emu_core::{Bus, Cpu, CpuError, SimpleBus};
use mos_6502::{Mos6502, flags};

/// Run one complete instruction and return the ticks it took.
fn run_instruction(cpu: &mut Mos6502, bus: &mut SimpleBus) -> u32 {
    // First tick fetches and executes
    cpu.tick(bus).expect("instruction should execute");
    let mut ticks = 1;

    for _ in 0..20 {
        if !cpu.is_executing() {
            return ticks;
        }
        cpu.tick(bus).expect("countdown tick");
        ticks += 1;
    }
    panic!("Instruction did not complete within 20 cycles");
}

/// Load a program at $0200 and set PC there.
fn setup_program(bus: &mut SimpleBus, cpu: &mut Mos6502, program: &[u8]) {
    bus.load(0x0200, program);
    cpu.regs.pc = 0x0200;
}

#[test]
fn test_adc_immediate_end_to_end() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0x69, 0x11]); // ADC #$11
    cpu.regs.a = 0xA5;

    cpu.tick(&mut bus).expect("tick 1");
    cpu.tick(&mut bus).expect("tick 2");

    assert_eq!(cpu.regs.a, 0xB6);
    assert!(!cpu.is_executing());
    assert_eq!(cpu.pc(), 0x0202);
}

#[test]
fn test_stack_pha_pla() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xA9, 0x42, // LDA #$42
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        0x48, // PHA
        0xA9, 0x00, // LDA #$00
        0x68, // PLA
    ];
    setup_program(&mut bus, &mut cpu, &program);

    for _ in 0..6 {
        run_instruction(&mut cpu, &mut bus);
    }

    assert_eq!(cpu.regs.a, 0x42, "PLA should restore A");
    assert_eq!(cpu.regs.sp, 0xFF, "SP should be back to $FF after PLA");
    assert_eq!(bus.peek(0x01FF), 0x42);
}

#[test]
fn test_stack_php_plp() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        0x38, // SEC (set carry)
        0x08, // PHP
        0x18, // CLC (clear carry)
        0x28, // PLP
    ];
    setup_program(&mut bus, &mut cpu, &program);

    let mut cycles = Vec::new();
    for _ in 0..6 {
        cycles.push(run_instruction(&mut cpu, &mut bus));
    }

    assert_eq!(cycles, vec![2, 2, 2, 3, 2, 4]);
    assert!(cpu.regs.c, "PLP should restore carry flag");
    assert_eq!(cpu.regs.sp, 0xFF, "SP should be back to $FF");
    // PHP pushes B and the unused bit set
    assert_eq!(
        bus.peek(0x01FF) & (flags::B | flags::U),
        flags::B | flags::U
    );
}

#[test]
fn test_stack_pointer_wraps_in_page_one() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        0x68, // PLA - SP wraps $FF -> $00, reads $0100
        0x48, // PHA - writes $0100, SP wraps $00 -> $FF
    ];
    setup_program(&mut bus, &mut cpu, &program);
    bus.poke(0x0100, 0x5A);

    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0x5A);
    assert_eq!(cpu.regs.sp, 0x00);

    bus.poke(0x0100, 0x00);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.sp, 0xFF);
    assert_eq!(bus.peek(0x0100), 0x5A);
}

#[test]
fn test_jsr_rts_round_trip() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0x20, 0x00, 0x03, // JSR $0300 @ $0200
        0xEA, // NOP       @ $0203
    ];
    setup_program(&mut bus, &mut cpu, &program);
    bus.load(0x0300, &[0xA9, 0x42, 0x60]); // LDA #$42; RTS

    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.pc(), 0x0300);
    assert_eq!(cpu.regs.sp, 0xFB);
    // Address of the following instruction, high byte pushed first
    assert_eq!(bus.peek(0x01FD), 0x02);
    assert_eq!(bus.peek(0x01FC), 0x03);

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.pc(), 0x0203, "RTS returns to the instruction after JSR");
    assert_eq!(cpu.regs.sp, 0xFD);
    assert_eq!(cpu.regs.a, 0x42);
}

#[test]
fn test_brk_stack_layout() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // BRK vector -> $0300
    bus.write(0xFFFE, 0x00);
    bus.write(0xFFFF, 0x03);

    let program = [
        0xA2, 0xFF, // LDX #$FF    @ $0200
        0x9A, // TXS         @ $0202
        0x58, // CLI         @ $0203
        0x00, // BRK         @ $0204
        0xEA, // padding     @ $0205 (skipped)
    ];
    setup_program(&mut bus, &mut cpu, &program);

    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(run_instruction(&mut cpu, &mut bus), 7);

    assert_eq!(cpu.pc(), 0x0300, "PC should be at BRK vector target");
    assert_eq!(cpu.regs.sp, 0xFC, "SP should be $FC after 3 pushes");
    assert!(cpu.regs.i, "I flag should be set after BRK");

    assert_eq!(bus.peek(0x01FF), 0x02, "PCH");
    assert_eq!(bus.peek(0x01FE), 0x06, "PCL skips the padding byte");
    let pushed_p = bus.peek(0x01FD);
    assert_ne!(pushed_p & flags::B, 0, "B set in pushed status");
    assert_ne!(pushed_p & flags::U, 0, "unused bit set in pushed status");
    assert_eq!(pushed_p & flags::I, 0, "I was clear when BRK ran");
}

#[test]
fn test_brk_rti_resumes_after_padding() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.write(0xFFFE, 0x00);
    bus.write(0xFFFF, 0x03);
    bus.load(0x0300, &[0x40]); // RTI

    setup_program(&mut bus, &mut cpu, &[0x38, 0x00, 0xEA, 0xA9, 0x07]);
    run_instruction(&mut cpu, &mut bus); // SEC
    run_instruction(&mut cpu, &mut bus); // BRK
    assert_eq!(run_instruction(&mut cpu, &mut bus), 6); // RTI

    assert_eq!(cpu.pc(), 0x0203);
    assert!(cpu.regs.c, "RTI restores the pushed carry");
    assert_eq!(cpu.regs.sp, 0xFD);
}

#[test]
fn test_page_cross_costs_one_cycle() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xBD, 0xFF, 0x12, // LDA $12FF,X -> $1303
        0xBD, 0x00, 0x12, // LDA $1200,X -> $1204
        0x7D, 0xFF, 0x12, // ADC $12FF,X
        0x9D, 0xFF, 0x12, // STA $12FF,X - fixed 5
        0x9D, 0x00, 0x12, // STA $1200,X - fixed 5
    ];
    setup_program(&mut bus, &mut cpu, &program);
    cpu.regs.x = 4;
    bus.poke(0x1303, 0x11);
    bus.poke(0x1204, 0x22);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.a, 0x11);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x22);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.a, 0x33);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(bus.peek(0x1303), 0x33);
}

#[test]
fn test_indirect_indexed_page_cross() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xB1, 0x40, 0xB1, 0x42]); // LDA ($40),Y twice
    bus.poke(0x0040, 0xFF);
    bus.poke(0x0041, 0x20);
    bus.poke(0x0042, 0x00);
    bus.poke(0x0043, 0x20);
    bus.poke(0x2100, 0x99);
    bus.poke(0x2001, 0x44);
    cpu.regs.y = 1;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.a, 0x44);
}

#[test]
fn test_branch_not_taken() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xF0, 0x05]); // BEQ +5
    cpu.regs.z = false;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.pc(), 0x0202);
}

#[test]
fn test_branch_taken_same_page() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xF0, 0x05]); // BEQ +5
    cpu.regs.z = true;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.pc(), 0x0207);
}

#[test]
fn test_branch_taken_backwards() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xEA, 0xEA, 0xD0, 0xFC]); // NOP; NOP; BNE -4
    cpu.regs.z = false;

    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.pc(), 0x0200);
}

#[test]
fn test_branch_taken_across_page() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.load(0x02F0, &[0xD0, 0x20]); // BNE +$20
    cpu.regs.pc = 0x02F0;
    cpu.regs.z = false;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.pc(), 0x0312);
}

#[test]
fn test_jmp_indirect_page_bug() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0x6C, 0xFF, 0x30]); // JMP ($30FF)
    bus.poke(0x30FF, 0x80);
    bus.poke(0x3000, 0x50);
    bus.poke(0x3100, 0x99);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.pc(), 0x5080, "high byte fetched from $3000, not $3100");
}

#[test]
fn test_read_modify_write() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xEE, 0x00, 0x10, // INC $1000
        0x0E, 0x00, 0x10, // ASL $1000
        0x0A, // ASL A
        0x66, 0x10, // ROR $10
    ];
    setup_program(&mut bus, &mut cpu, &program);
    bus.poke(0x1000, 0x7F);
    bus.poke(0x0010, 0x02);
    cpu.regs.a = 0x81;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);
    assert_eq!(bus.peek(0x1000), 0x80);
    assert!(cpu.regs.n);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);
    assert_eq!(bus.peek(0x1000), 0x00);
    assert!(cpu.regs.c && cpu.regs.z);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x02);
    assert!(cpu.regs.c);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(bus.peek(0x0010), 0x81, "carry rotated into bit 7");
    assert!(!cpu.regs.c);
}

#[test]
fn test_transfers_and_flags() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xA9, 0x00, // LDA #$00
        0xAA, // TAX -> Z
        0xA2, 0x80, // LDX #$80
        0x9A, // TXS - no flag change
        0xBA, // TSX
        0xC8, // INY
    ];
    setup_program(&mut bus, &mut cpu, &program);

    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert!(cpu.regs.z);

    run_instruction(&mut cpu, &mut bus);
    cpu.regs.n = false;
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.sp, 0x80);
    assert!(!cpu.regs.n, "TXS must not touch flags");

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.x, 0x80);
    assert!(cpu.regs.n);

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.y, 0x01);
}

#[test]
fn test_compare_and_bit() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xA9, 0x40, // LDA #$40
        0xC9, 0x40, // CMP #$40
        0xE0, 0x01, // CPX #$01
        0x24, 0x10, // BIT $10
    ];
    setup_program(&mut bus, &mut cpu, &program);
    bus.poke(0x0010, 0xC0);

    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert!(cpu.regs.c && cpu.regs.z);

    run_instruction(&mut cpu, &mut bus);
    assert!(!cpu.regs.c, "X=0 is below 1");
    assert!(cpu.regs.n);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert!(!cpu.regs.z);
    assert!(cpu.regs.n && cpu.regs.v);
}

#[test]
fn test_decimal_mode_adc() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xF8, 0x18, 0xA9, 0x58, 0x69, 0x46]); // SED; CLC; LDA #$58; ADC #$46

    for _ in 0..4 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0x04);
    assert!(cpu.regs.c);
}

#[test]
fn test_irq_serviced_at_instruction_boundary() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.write(0xFFFE, 0x00);
    bus.write(0xFFFF, 0x04);
    setup_program(&mut bus, &mut cpu, &[0x58, 0xEA, 0xEA]); // CLI; NOP; NOP

    run_instruction(&mut cpu, &mut bus);
    cpu.tick(&mut bus).expect("NOP");
    assert!(cpu.interrupt(), "IRQ accepted with I clear");
    assert!(cpu.is_executing());
    cpu.tick(&mut bus).expect("NOP finishes");
    assert_eq!(cpu.pc(), 0x0202, "IRQ waits for the instruction boundary");

    assert_eq!(run_instruction(&mut cpu, &mut bus), 7);
    assert_eq!(cpu.pc(), 0x0400);
    assert!(cpu.regs.i);
    assert_eq!(bus.peek(0x01FD), 0x02);
    assert_eq!(bus.peek(0x01FC), 0x02);
    let pushed_p = bus.peek(0x01FB);
    assert_eq!(pushed_p & flags::B, 0, "hardware interrupts push B clear");
    assert_ne!(pushed_p & flags::U, 0);
}

#[test]
fn test_nmi_wins_over_irq() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.write(0xFFFA, 0x00);
    bus.write(0xFFFB, 0x05);
    bus.write(0xFFFE, 0x00);
    bus.write(0xFFFF, 0x04);
    setup_program(&mut bus, &mut cpu, &[0xEA]);
    cpu.regs.i = false;

    assert!(cpu.interrupt());
    cpu.nmi();
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.pc(), 0x0500);

    // I is now set but the IRQ was already latched
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.pc(), 0x0400);
}

#[test]
fn test_unknown_opcode_does_not_advance() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x01, 0x02]); // LDA #$01; illegal $02

    run_instruction(&mut cpu, &mut bus);
    let result = cpu.tick(&mut bus);
    assert_eq!(
        result,
        Err(CpuError::UnknownOpcode {
            opcode: 0x02,
            pc: 0x0202
        })
    );
    assert_eq!(cpu.pc(), 0x0202);
    assert_eq!(cpu.regs.a, 0x01);
    assert!(!cpu.is_executing());
}

#[test]
fn test_step_reports_cycles() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xA1, 0x10, 0xEA]); // LDA ($10,X); NOP

    assert_eq!(cpu.step(&mut bus), Ok(6));
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.cycles().get(), 8);
}

#[test]
fn test_reset_and_reset_vector() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.write(0xFFFC, 0x34);
    bus.write(0xFFFD, 0x12);
    cpu.regs.a = 0x99;
    cpu.regs.i = false;
    cpu.regs.sp = 0x10;

    cpu.reset();
    cpu.load_reset_vector(&mut bus);

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.sp, 0xFD);
    assert!(cpu.regs.i);
    assert_eq!(bus.peek(0xFFFC), 0x34, "reset leaves memory alone");
}
