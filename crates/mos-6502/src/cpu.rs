//! The 6502 processor: fetch, decode, execute and the cycle countdown.

use emu_core::{Bus, Cpu, CpuError, EffectiveAddress, Observable, Operand, RunState, Ticks, Value};
use log::{debug, trace, warn};

use crate::flags::{B, U};
use crate::{Mnemonic, Opcode, Registers, Variant, alu, decode};

/// NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ and BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles to push PC and P and fetch a vector.
const INTERRUPT_CYCLES: u32 = 7;

/// The MOS 6502 CPU.
///
/// `tick()` advances one clock cycle. The whole instruction runs on the cycle
/// that fetches its opcode; the remaining cycles only count down, so the bus
/// sees every access on that first tick.
#[derive(Debug, Clone)]
pub struct Mos6502 {
    /// CPU registers. Public so hosts and debuggers can inspect and poke them.
    pub regs: Registers,
    variant: Variant,
    run: RunState,
    /// Total cycles executed.
    cycles: Ticks,
    /// NMI latched, serviced at the next instruction boundary.
    nmi_pending: bool,
    /// IRQ latched, serviced at the next instruction boundary.
    irq_pending: bool,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

/// An opcode that has been fetched and had its operand resolved.
struct Decoded {
    pc: u16,
    byte: u8,
    opcode: Opcode,
    operand: Operand,
}

impl Decoded {
    fn address(&self) -> Result<u16, CpuError> {
        self.operand
            .address
            .address()
            .ok_or_else(|| CpuError::InvalidAddressing {
                opcode: self.byte,
                pc: self.pc,
                mnemonic: self.opcode.mnemonic.to_string(),
                mode: format!("{:?}", self.opcode.mode),
            })
    }
}

impl Mos6502 {
    /// Create an NMOS 6502 in reset state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_variant(Variant::Nmos6502)
    }

    /// Create a CPU of the given variant in reset state.
    #[must_use]
    pub fn with_variant(variant: Variant) -> Self {
        Self {
            regs: Registers::new(),
            variant,
            run: RunState::new(),
            cycles: Ticks::ZERO,
            nmi_pending: false,
            irq_pending: false,
        }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Total cycles executed since construction.
    #[must_use]
    pub fn cycles(&self) -> Ticks {
        self.cycles
    }

    /// Load PC from the reset vector at $FFFC.
    pub fn load_reset_vector(&mut self, bus: &mut impl Bus) {
        self.regs.pc = Self::read_word(bus, RESET_VECTOR);
        debug!("6502 reset vector -> ${:04X}", self.regs.pc);
    }

    /// Run one whole instruction (or interrupt entry) and return its cycles.
    ///
    /// Any instruction still counting down from `tick()` is finished first.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        while self.run.is_executing() {
            self.run.tick();
            self.cycles += 1;
        }
        let cycles = self.begin(bus)?;
        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    /// Start the next instruction and return its total cycle cost.
    fn begin<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if self.nmi_pending {
            self.nmi_pending = false;
            return Ok(self.service_interrupt(bus, NMI_VECTOR, "NMI"));
        }
        if self.irq_pending {
            self.irq_pending = false;
            return Ok(self.service_interrupt(bus, IRQ_VECTOR, "IRQ"));
        }

        let pc = self.regs.pc;
        let byte = bus.read(pc);
        let Some(opcode) = decode(byte) else {
            warn!("6502 unknown opcode ${byte:02X} at ${pc:04X}");
            return Err(CpuError::UnknownOpcode { opcode: byte, pc });
        };

        let snapshot = self.regs;
        self.regs.pc = pc.wrapping_add(1);
        let operand = self.resolve(opcode.mode, bus);
        trace!("{pc:04X}  {byte:02X}  {} {:?}", opcode.mnemonic, opcode.mode);

        let decoded = Decoded {
            pc,
            byte,
            opcode,
            operand,
        };
        match self.execute(bus, &decoded) {
            Ok(extra) => {
                let penalty = operand.page_crossed && opcode.mnemonic.has_page_penalty();
                Ok(u32::from(opcode.cycles) + u32::from(penalty) + extra)
            }
            Err(err) => {
                warn!("6502 {err}");
                self.regs = snapshot;
                Err(err)
            }
        }
    }

    fn service_interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16, kind: &str) -> u32 {
        debug!("6502 {kind} at ${:04X}", self.regs.pc);
        self.push_word(bus, self.regs.pc);
        self.push(bus, (self.regs.status() & !B) | U);
        self.regs.i = true;
        self.regs.pc = Self::read_word(bus, vector);
        INTERRUPT_CYCLES
    }

    fn decimal_enabled(&self) -> bool {
        self.variant.supports_decimal()
    }

    fn read_operand<B: Bus>(bus: &mut B, decoded: &Decoded) -> Result<u8, CpuError> {
        Ok(bus.read(decoded.address()?))
    }

    /// Shift/rotate on A (no address) or on memory.
    fn shift<B: Bus>(
        &mut self,
        bus: &mut B,
        decoded: &Decoded,
        op: fn(&mut Registers, u8) -> u8,
    ) {
        match decoded.operand.address {
            EffectiveAddress::None => {
                let a = self.regs.a;
                self.regs.a = op(&mut self.regs, a);
            }
            EffectiveAddress::Address(addr) => {
                let value = bus.read(addr);
                let result = op(&mut self.regs, value);
                bus.write(addr, result);
            }
        }
    }

    fn modify_memory<B: Bus>(
        &mut self,
        bus: &mut B,
        decoded: &Decoded,
        op: fn(&mut Registers, u8) -> u8,
    ) -> Result<(), CpuError> {
        let addr = decoded.address()?;
        let value = bus.read(addr);
        let result = op(&mut self.regs, value);
        bus.write(addr, result);
        Ok(())
    }

    /// Returns the extra cycles: 1 if taken, 1 more if the target is on
    /// another page.
    fn branch(&mut self, decoded: &Decoded, condition: bool) -> Result<u32, CpuError> {
        let target = decoded.address()?;
        if !condition {
            return Ok(0);
        }
        self.regs.pc = target;
        Ok(1 + u32::from(decoded.operand.page_crossed))
    }

    /// Execute a decoded instruction. Returns cycles beyond the base count
    /// and any page-cross penalty.
    fn execute<B: Bus>(&mut self, bus: &mut B, decoded: &Decoded) -> Result<u32, CpuError> {
        let decimal = self.decimal_enabled();
        let Registers { a, x, y, sp, .. } = self.regs;
        let regs = &mut self.regs;
        match decoded.opcode.mnemonic {
            // Load/store
            Mnemonic::Lda => regs.a = alu::load(regs, Self::read_operand(bus, decoded)?),
            Mnemonic::Ldx => regs.x = alu::load(regs, Self::read_operand(bus, decoded)?),
            Mnemonic::Ldy => regs.y = alu::load(regs, Self::read_operand(bus, decoded)?),
            Mnemonic::Sta => bus.write(decoded.address()?, regs.a),
            Mnemonic::Stx => bus.write(decoded.address()?, regs.x),
            Mnemonic::Sty => bus.write(decoded.address()?, regs.y),

            // Transfers; TXS leaves the flags alone
            Mnemonic::Tax => regs.x = alu::load(regs, a),
            Mnemonic::Tay => regs.y = alu::load(regs, a),
            Mnemonic::Txa => regs.a = alu::load(regs, x),
            Mnemonic::Tya => regs.a = alu::load(regs, y),
            Mnemonic::Tsx => regs.x = alu::load(regs, sp),
            Mnemonic::Txs => regs.sp = x,

            // Arithmetic and logic
            Mnemonic::Adc => alu::adc(regs, Self::read_operand(bus, decoded)?, decimal),
            Mnemonic::Sbc => alu::sbc(regs, Self::read_operand(bus, decoded)?, decimal),
            Mnemonic::And => alu::and(regs, Self::read_operand(bus, decoded)?),
            Mnemonic::Ora => alu::ora(regs, Self::read_operand(bus, decoded)?),
            Mnemonic::Eor => alu::eor(regs, Self::read_operand(bus, decoded)?),
            Mnemonic::Bit => alu::bit(regs, Self::read_operand(bus, decoded)?),
            Mnemonic::Cmp => {
                let value = Self::read_operand(bus, decoded)?;
                alu::compare(regs, a, value);
            }
            Mnemonic::Cpx => {
                let value = Self::read_operand(bus, decoded)?;
                alu::compare(regs, x, value);
            }
            Mnemonic::Cpy => {
                let value = Self::read_operand(bus, decoded)?;
                alu::compare(regs, y, value);
            }

            // Increment/decrement
            Mnemonic::Inc => self.modify_memory(bus, decoded, alu::inc)?,
            Mnemonic::Dec => self.modify_memory(bus, decoded, alu::dec)?,
            Mnemonic::Inx => regs.x = alu::inc(regs, x),
            Mnemonic::Iny => regs.y = alu::inc(regs, y),
            Mnemonic::Dex => regs.x = alu::dec(regs, x),
            Mnemonic::Dey => regs.y = alu::dec(regs, y),

            // Shifts
            Mnemonic::Asl => self.shift(bus, decoded, alu::asl),
            Mnemonic::Lsr => self.shift(bus, decoded, alu::lsr),
            Mnemonic::Rol => self.shift(bus, decoded, alu::rol),
            Mnemonic::Ror => self.shift(bus, decoded, alu::ror),

            // Stack
            Mnemonic::Pha => self.push(bus, self.regs.a),
            Mnemonic::Php => self.push(bus, self.regs.status() | B | U),
            Mnemonic::Pla => {
                let value = self.pull(bus);
                self.regs.a = alu::load(&mut self.regs, value);
            }
            Mnemonic::Plp => {
                let p = self.pull(bus);
                self.regs.set_status(p);
            }

            // Jumps, calls and returns
            Mnemonic::Jmp => regs.pc = decoded.address()?,
            Mnemonic::Jsr => {
                let target = decoded.address()?;
                self.push_word(bus, self.regs.pc);
                self.regs.pc = target;
            }
            Mnemonic::Rts => self.regs.pc = self.pull_word(bus),
            Mnemonic::Rti => {
                let p = self.pull(bus);
                self.regs.set_status(p);
                self.regs.pc = self.pull_word(bus);
            }
            Mnemonic::Brk => {
                // Skip the padding byte after BRK
                let ret = self.regs.pc.wrapping_add(1);
                debug!("6502 BRK at ${:04X}", decoded.pc);
                self.push_word(bus, ret);
                self.push(bus, self.regs.status() | B | U);
                self.regs.i = true;
                self.regs.pc = Self::read_word(bus, IRQ_VECTOR);
            }

            // Branches
            Mnemonic::Bcc => return self.branch(decoded, !self.regs.c),
            Mnemonic::Bcs => return self.branch(decoded, self.regs.c),
            Mnemonic::Bne => return self.branch(decoded, !self.regs.z),
            Mnemonic::Beq => return self.branch(decoded, self.regs.z),
            Mnemonic::Bpl => return self.branch(decoded, !self.regs.n),
            Mnemonic::Bmi => return self.branch(decoded, self.regs.n),
            Mnemonic::Bvc => return self.branch(decoded, !self.regs.v),
            Mnemonic::Bvs => return self.branch(decoded, self.regs.v),

            // Flags
            Mnemonic::Clc => regs.c = false,
            Mnemonic::Sec => regs.c = true,
            Mnemonic::Cli => regs.i = false,
            Mnemonic::Sei => regs.i = true,
            Mnemonic::Cld => regs.d = false,
            Mnemonic::Sed => regs.d = true,
            Mnemonic::Clv => regs.v = false,

            Mnemonic::Nop => {}
        }
        Ok(0)
    }
}

impl Cpu for Mos6502 {
    type Registers = Registers;

    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        if self.run.is_executing() {
            self.run.tick();
            self.cycles += 1;
            return Ok(());
        }
        let cycles = self.begin(bus)?;
        self.run.begin(cycles);
        self.cycles += 1;
        Ok(())
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_executing(&self) -> bool {
        self.run.is_executing()
    }

    fn is_halted(&self) -> bool {
        false
    }

    fn interrupt(&mut self) -> bool {
        if self.regs.i {
            return false;
        }
        self.irq_pending = true;
        true
    }

    fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    fn reset(&mut self) {
        debug!("6502 reset");
        self.regs = Registers::new();
        self.run.clear();
        self.nmi_pending = false;
        self.irq_pending = false;
    }
}

const QUERY_PATHS: &[&str] = &[
    "a",
    "x",
    "y",
    "sp",
    "pc",
    "p",
    "flags.n",
    "flags.v",
    "flags.b",
    "flags.d",
    "flags.i",
    "flags.z",
    "flags.c",
    "cycles",
    "executing",
];

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        let regs = &self.regs;
        Some(match path {
            "a" => regs.a.into(),
            "x" => regs.x.into(),
            "y" => regs.y.into(),
            "sp" => regs.sp.into(),
            "pc" => regs.pc.into(),
            "p" => regs.status().into(),
            "flags.n" => regs.n.into(),
            "flags.v" => regs.v.into(),
            "flags.b" => regs.b.into(),
            "flags.d" => regs.d.into(),
            "flags.i" => regs.i.into(),
            "flags.z" => regs.z.into(),
            "flags.c" => regs.c.into(),
            "cycles" => self.cycles.get().into(),
            "executing" => self.run.is_executing().into(),
            _ => return None,
        })
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
