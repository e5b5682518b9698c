//! The 6800 processor: fetch, decode, execute, interrupts and bus pins.

use emu_core::{Bus, Cpu, CpuError, Observable, Operand, RunState, Ticks, Value};
use log::{debug, trace, warn};

use crate::{Accumulator, Mnemonic, Opcode, Registers, alu, decode};

/// IRQ vector.
pub const IRQ_VECTOR: u16 = 0xFFF8;
/// SWI vector.
pub const SWI_VECTOR: u16 = 0xFFFA;
/// NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFC;
/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFE;

/// Stack the frame, set I, fetch the vector.
const INTERRUPT_CYCLES: u32 = 12;
/// Leaving WAI: the frame is already stacked, only the vector is fetched.
const WAKE_CYCLES: u32 = 4;

/// The Motorola 6800 CPU.
///
/// Like the 6502 core, a whole instruction executes on its first `tick()`
/// and the rest of its cycles are counted down. The HALT pin and WAI both
/// park the CPU at an instruction boundary with the bus released.
#[derive(Debug, Clone, Default)]
pub struct Mc6800 {
    /// CPU registers. Public so hosts and debuggers can inspect and poke them.
    pub regs: Registers,
    run: RunState,
    cycles: Ticks,
    nmi_pending: bool,
    irq_pending: bool,
    /// HALT input asserted.
    halt: bool,
    /// Stopped in WAI with the frame stacked.
    waiting: bool,
}

/// An opcode that has been fetched and had its operand resolved.
struct Decoded {
    pc: u16,
    byte: u8,
    opcode: Opcode,
    operand: Operand,
}

impl Decoded {
    fn invalid(&self) -> CpuError {
        CpuError::InvalidAddressing {
            opcode: self.byte,
            pc: self.pc,
            mnemonic: self.opcode.mnemonic.to_string(),
            mode: format!("{:?}", self.opcode.mode),
        }
    }

    fn address(&self) -> Result<u16, CpuError> {
        self.operand.address.address().ok_or_else(|| self.invalid())
    }

    fn accumulator(&self) -> Result<Accumulator, CpuError> {
        self.opcode.acc.ok_or_else(|| self.invalid())
    }
}

impl Mc6800 {
    /// Create a 6800 with every register clear.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total cycles elapsed, idle cycles included.
    #[must_use]
    pub fn cycles(&self) -> Ticks {
        self.cycles
    }

    /// Drive the HALT input. The CPU stops at the next instruction boundary.
    pub fn set_halt(&mut self, asserted: bool) {
        if asserted != self.halt {
            debug!("6800 HALT {}", if asserted { "asserted" } else { "released" });
        }
        self.halt = asserted;
    }

    /// BA output: the CPU has released the bus (halted or in WAI).
    #[must_use]
    pub fn bus_available(&self) -> bool {
        !self.run.is_executing() && (self.halt || self.waiting)
    }

    /// Parked in WAI until an unmasked interrupt arrives.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Load PC from the reset vector at $FFFE.
    pub fn load_reset_vector(&mut self, bus: &mut impl Bus) {
        self.regs.pc = Self::read_word(bus, RESET_VECTOR);
        debug!("6800 reset vector -> ${:04X}", self.regs.pc);
    }

    /// Run one whole instruction (or interrupt entry) and return its cycles.
    ///
    /// Any instruction still counting down from `tick()` is finished first.
    /// While halted or waiting a single idle cycle passes.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        while self.run.is_executing() {
            self.run.tick();
            self.cycles += 1;
        }
        let cycles = self.begin(bus)?.unwrap_or(1);
        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    /// Start the next instruction. `None` means the CPU sat idle this cycle.
    fn begin<B: Bus>(&mut self, bus: &mut B) -> Result<Option<u32>, CpuError> {
        if self.halt {
            return Ok(None);
        }

        if self.waiting {
            let vector = if self.nmi_pending {
                self.nmi_pending = false;
                NMI_VECTOR
            } else if self.irq_pending {
                self.irq_pending = false;
                IRQ_VECTOR
            } else {
                return Ok(None);
            };
            debug!("6800 leaving WAI via ${vector:04X}");
            self.waiting = false;
            self.regs.i = true;
            self.regs.pc = Self::read_word(bus, vector);
            return Ok(Some(WAKE_CYCLES));
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            return Ok(Some(self.service_interrupt(bus, NMI_VECTOR, "NMI")));
        }
        if self.irq_pending {
            self.irq_pending = false;
            return Ok(Some(self.service_interrupt(bus, IRQ_VECTOR, "IRQ")));
        }

        let pc = self.regs.pc;
        let byte = bus.read(pc);
        let Some(opcode) = decode(byte) else {
            warn!("6800 unknown opcode ${byte:02X} at ${pc:04X}");
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
            Ok(()) => Ok(Some(u32::from(opcode.cycles))),
            Err(err) => {
                warn!("6800 {err}");
                self.regs = snapshot;
                Err(err)
            }
        }
    }

    /// PC, IX, A, B, CC: the register block every interrupt entry stacks.
    fn push_frame<B: Bus>(&mut self, bus: &mut B) {
        self.push_word(bus, self.regs.pc);
        self.push_word(bus, self.regs.ix);
        self.push(bus, self.regs.a);
        self.push(bus, self.regs.b);
        self.push(bus, self.regs.cc());
    }

    fn pull_frame<B: Bus>(&mut self, bus: &mut B) {
        let cc = self.pull(bus);
        self.regs.set_cc(cc);
        self.regs.b = self.pull(bus);
        self.regs.a = self.pull(bus);
        self.regs.ix = self.pull_word(bus);
        self.regs.pc = self.pull_word(bus);
    }

    fn service_interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16, kind: &str) -> u32 {
        debug!("6800 {kind} at ${:04X}", self.regs.pc);
        self.push_frame(bus);
        self.regs.i = true;
        self.regs.pc = Self::read_word(bus, vector);
        INTERRUPT_CYCLES
    }

    /// Accumulator, its current value and the memory operand.
    fn acc_operand<B: Bus>(
        &self,
        bus: &mut B,
        decoded: &Decoded,
    ) -> Result<(Accumulator, u8, u8), CpuError> {
        let acc = decoded.accumulator()?;
        let value = bus.read(decoded.address()?);
        Ok((acc, self.regs.acc(acc), value))
    }

    /// Read-modify-write on an accumulator (A/B forms) or memory.
    fn modify<B: Bus>(
        &mut self,
        bus: &mut B,
        decoded: &Decoded,
        op: fn(&mut Registers, u8) -> u8,
    ) -> Result<(), CpuError> {
        if let Some(acc) = decoded.opcode.acc {
            let value = self.regs.acc(acc);
            let result = op(&mut self.regs, value);
            self.regs.set_acc(acc, result);
        } else {
            let addr = decoded.address()?;
            let value = bus.read(addr);
            let result = op(&mut self.regs, value);
            bus.write(addr, result);
        }
        Ok(())
    }

    fn branch(&mut self, decoded: &Decoded, condition: bool) -> Result<(), CpuError> {
        let target = decoded.address()?;
        if condition {
            self.regs.pc = target;
        }
        Ok(())
    }

    fn execute<B: Bus>(&mut self, bus: &mut B, decoded: &Decoded) -> Result<(), CpuError> {
        let Registers {
            a,
            b,
            ix,
            sp,
            n,
            z,
            v,
            c,
            ..
        } = self.regs;

        match decoded.opcode.mnemonic {
            // Accumulator/memory arithmetic and logic
            Mnemonic::Add => {
                let (acc, current, value) = self.acc_operand(bus, decoded)?;
                let result = alu::add(&mut self.regs, current, value, false);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Adc => {
                let (acc, current, value) = self.acc_operand(bus, decoded)?;
                let result = alu::add(&mut self.regs, current, value, c);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Sub => {
                let (acc, current, value) = self.acc_operand(bus, decoded)?;
                let result = alu::sub(&mut self.regs, current, value, false);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Sbc => {
                let (acc, current, value) = self.acc_operand(bus, decoded)?;
                let result = alu::sub(&mut self.regs, current, value, c);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Cmp => {
                let (_, current, value) = self.acc_operand(bus, decoded)?;
                alu::sub(&mut self.regs, current, value, false);
            }
            Mnemonic::And => {
                let (acc, current, value) = self.acc_operand(bus, decoded)?;
                let result = alu::and(&mut self.regs, current, value);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Bit => {
                let (_, current, value) = self.acc_operand(bus, decoded)?;
                alu::and(&mut self.regs, current, value);
            }
            Mnemonic::Ora => {
                let (acc, current, value) = self.acc_operand(bus, decoded)?;
                let result = alu::ora(&mut self.regs, current, value);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Eor => {
                let (acc, current, value) = self.acc_operand(bus, decoded)?;
                let result = alu::eor(&mut self.regs, current, value);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Lda => {
                let (acc, _, value) = self.acc_operand(bus, decoded)?;
                let result = alu::load(&mut self.regs, value);
                self.regs.set_acc(acc, result);
            }
            Mnemonic::Sta => {
                let acc = decoded.accumulator()?;
                let addr = decoded.address()?;
                let value = self.regs.acc(acc);
                bus.write(addr, alu::load(&mut self.regs, value));
            }

            // Accumulator-to-accumulator
            Mnemonic::Aba => self.regs.a = alu::add(&mut self.regs, a, b, false),
            Mnemonic::Sba => self.regs.a = alu::sub(&mut self.regs, a, b, false),
            Mnemonic::Cba => {
                alu::sub(&mut self.regs, a, b, false);
            }
            Mnemonic::Tab => self.regs.b = alu::load(&mut self.regs, a),
            Mnemonic::Tba => self.regs.a = alu::load(&mut self.regs, b),
            Mnemonic::Daa => self.regs.a = alu::daa(&mut self.regs, a),

            // Read-modify-write
            Mnemonic::Neg => self.modify(bus, decoded, alu::negate)?,
            Mnemonic::Com => self.modify(bus, decoded, alu::complement)?,
            Mnemonic::Lsr => self.modify(bus, decoded, alu::lsr)?,
            Mnemonic::Ror => self.modify(bus, decoded, alu::ror)?,
            Mnemonic::Asr => self.modify(bus, decoded, alu::asr)?,
            Mnemonic::Asl => self.modify(bus, decoded, alu::asl)?,
            Mnemonic::Rol => self.modify(bus, decoded, alu::rol)?,
            Mnemonic::Dec => self.modify(bus, decoded, alu::dec)?,
            Mnemonic::Inc => self.modify(bus, decoded, alu::inc)?,
            Mnemonic::Clr => self.modify(bus, decoded, |regs, _| alu::clear(regs))?,
            Mnemonic::Tst => {
                let value = match decoded.opcode.acc {
                    Some(acc) => self.regs.acc(acc),
                    None => bus.read(decoded.address()?),
                };
                alu::test(&mut self.regs, value);
            }

            // Index register and stack pointer
            Mnemonic::Cpx => {
                let value = Self::read_word(bus, decoded.address()?);
                alu::compare16(&mut self.regs, ix, value);
            }
            Mnemonic::Ldx => {
                let value = Self::read_word(bus, decoded.address()?);
                self.regs.ix = alu::load16(&mut self.regs, value);
            }
            Mnemonic::Lds => {
                let value = Self::read_word(bus, decoded.address()?);
                self.regs.sp = alu::load16(&mut self.regs, value);
            }
            Mnemonic::Stx => {
                let addr = decoded.address()?;
                Self::write_word(bus, addr, alu::load16(&mut self.regs, ix));
            }
            Mnemonic::Sts => {
                let addr = decoded.address()?;
                Self::write_word(bus, addr, alu::load16(&mut self.regs, sp));
            }
            Mnemonic::Inx => {
                self.regs.ix = ix.wrapping_add(1);
                self.regs.z = self.regs.ix == 0;
            }
            Mnemonic::Dex => {
                self.regs.ix = ix.wrapping_sub(1);
                self.regs.z = self.regs.ix == 0;
            }
            Mnemonic::Ins => self.regs.sp = sp.wrapping_add(1),
            Mnemonic::Des => self.regs.sp = sp.wrapping_sub(1),
            Mnemonic::Tsx => self.regs.ix = sp.wrapping_add(1),
            Mnemonic::Txs => self.regs.sp = ix.wrapping_sub(1),
            Mnemonic::Psh => {
                let acc = decoded.accumulator()?;
                self.push(bus, self.regs.acc(acc));
            }
            Mnemonic::Pul => {
                let acc = decoded.accumulator()?;
                let value = self.pull(bus);
                self.regs.set_acc(acc, value);
            }

            // Condition codes
            Mnemonic::Tap => self.regs.set_cc(a),
            Mnemonic::Tpa => self.regs.a = self.regs.cc(),
            Mnemonic::Clc => self.regs.c = false,
            Mnemonic::Sec => self.regs.c = true,
            Mnemonic::Cli => self.regs.i = false,
            Mnemonic::Sei => self.regs.i = true,
            Mnemonic::Clv => self.regs.v = false,
            Mnemonic::Sev => self.regs.v = true,
            Mnemonic::Nop => {}

            // Jumps, calls and returns
            Mnemonic::Jmp => self.regs.pc = decoded.address()?,
            Mnemonic::Jsr | Mnemonic::Bsr => {
                let target = decoded.address()?;
                self.push_word(bus, self.regs.pc);
                self.regs.pc = target;
            }
            Mnemonic::Rts => self.regs.pc = self.pull_word(bus),
            Mnemonic::Rti => self.pull_frame(bus),
            Mnemonic::Swi => {
                debug!("6800 SWI at ${:04X}", decoded.pc);
                self.push_frame(bus);
                self.regs.i = true;
                self.regs.pc = Self::read_word(bus, SWI_VECTOR);
            }
            Mnemonic::Wai => {
                self.push_frame(bus);
                self.waiting = true;
                debug!("6800 WAI at ${:04X}", decoded.pc);
            }

            // Branches
            Mnemonic::Bra => self.branch(decoded, true)?,
            Mnemonic::Bhi => self.branch(decoded, !(c || z))?,
            Mnemonic::Bls => self.branch(decoded, c || z)?,
            Mnemonic::Bcc => self.branch(decoded, !c)?,
            Mnemonic::Bcs => self.branch(decoded, c)?,
            Mnemonic::Bne => self.branch(decoded, !z)?,
            Mnemonic::Beq => self.branch(decoded, z)?,
            Mnemonic::Bvc => self.branch(decoded, !v)?,
            Mnemonic::Bvs => self.branch(decoded, v)?,
            Mnemonic::Bpl => self.branch(decoded, !n)?,
            Mnemonic::Bmi => self.branch(decoded, n)?,
            Mnemonic::Bge => self.branch(decoded, !(n ^ v))?,
            Mnemonic::Blt => self.branch(decoded, n ^ v)?,
            Mnemonic::Bgt => self.branch(decoded, !(z || (n ^ v)))?,
            Mnemonic::Ble => self.branch(decoded, z || (n ^ v))?,
        }
        Ok(())
    }
}

impl Cpu for Mc6800 {
    type Registers = Registers;

    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        if self.run.is_executing() {
            self.run.tick();
        } else if let Some(cycles) = self.begin(bus)? {
            self.run.begin(cycles);
        }
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

    /// HALT asserted and the current instruction has finished.
    fn is_halted(&self) -> bool {
        self.halt && !self.run.is_executing()
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

    /// Clear registers, latches and WAI. The HALT pin is external and keeps
    /// its level.
    fn reset(&mut self) {
        debug!("6800 reset");
        self.regs = Registers::new();
        self.run.clear();
        self.nmi_pending = false;
        self.irq_pending = false;
        self.waiting = false;
    }
}

const QUERY_PATHS: &[&str] = &[
    "a",
    "b",
    "ix",
    "sp",
    "pc",
    "cc",
    "flags.h",
    "flags.i",
    "flags.n",
    "flags.z",
    "flags.v",
    "flags.c",
    "cycles",
    "executing",
    "waiting",
    "halted",
];

impl Observable for Mc6800 {
    fn query(&self, path: &str) -> Option<Value> {
        let regs = &self.regs;
        Some(match path {
            "a" => regs.a.into(),
            "b" => regs.b.into(),
            "ix" => regs.ix.into(),
            "sp" => regs.sp.into(),
            "pc" => regs.pc.into(),
            "cc" => regs.cc().into(),
            "flags.h" => regs.h.into(),
            "flags.i" => regs.i.into(),
            "flags.n" => regs.n.into(),
            "flags.z" => regs.z.into(),
            "flags.v" => regs.v.into(),
            "flags.c" => regs.c.into(),
            "cycles" => self.cycles.get().into(),
            "executing" => self.run.is_executing().into(),
            "waiting" => self.waiting.into(),
            "halted" => self.is_halted().into(),
            _ => return None,
        })
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
