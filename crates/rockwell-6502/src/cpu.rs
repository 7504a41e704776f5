//! 6502 execution engine.
//!
//! The engine counts cycles down rather than modelling each bus access. When
//! the count reaches zero, the next `clock()` fetches, decodes and executes a
//! whole instruction, then charges its full cost to the counter. The host
//! still sees one call per cycle, so peripherals stepped in lock-step between
//! calls observe correct instruction timing.

use std::fmt;

use emu_core::{Bus, Cpu, Observable, Tickable, Value};
use log::{Level, debug, log_enabled, trace};

use crate::addressing::Operand;
use crate::flags::{B, C, D, I, N, V, Z};
use crate::{CpuConfig, Instruction, Registers, Status, lookup};

/// Address of the reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Address of the NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFA;

const RESET_CYCLES: u8 = 8;
const IRQ_CYCLES: u8 = 7;
const NMI_CYCLES: u8 = 8;

/// The Rockwell R6502 CPU, bound to the bus it drives.
///
/// Hold the bus by value, or lend it with `R6502::new(&mut bus)`.
pub struct R6502<B: Bus> {
    pub(crate) regs: Registers,
    pub(crate) bus: B,
    pub(crate) config: CpuConfig,
    /// Opcode of the instruction in flight.
    pub(crate) opcode: u8,
    /// Where the current instruction's operand lives.
    pub(crate) operand: Operand,
    /// Last operand value fetched.
    pub(crate) data: u8,
    /// Cycles left before the next fetch.
    pub(crate) remaining: u8,
    pub(crate) irq_pending: bool,
    pub(crate) nmi_pending: bool,
    pub(crate) total_cycles: u64,
}

impl<B: Bus> fmt::Debug for R6502<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("R6502")
            .field("regs", &self.regs)
            .field("config", &self.config)
            .field("opcode", &self.opcode)
            .field("remaining", &self.remaining)
            .field("irq_pending", &self.irq_pending)
            .field("nmi_pending", &self.nmi_pending)
            .field("total_cycles", &self.total_cycles)
            .finish_non_exhaustive()
    }
}

impl<B: Bus> R6502<B> {
    /// Bind a CPU to `bus` with the default configuration.
    ///
    /// Registers start value-initialised (PC $0000, S $FD). Call `reset()`
    /// to load the PC from the reset vector.
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, CpuConfig::default())
    }

    /// Bind a CPU to `bus` with an explicit configuration.
    pub fn with_config(bus: B, config: CpuConfig) -> Self {
        Self {
            regs: Registers::new(),
            bus,
            config,
            opcode: 0,
            operand: Operand::Implied,
            data: 0,
            remaining: 0,
            irq_pending: false,
            nmi_pending: false,
            total_cycles: 0,
        }
    }

    /// Clock until the current instruction, or the pending reset or
    /// interrupt sequence, has completed.
    ///
    /// Returns the number of cycles clocked. At an instruction boundary this
    /// runs exactly one instruction.
    pub fn step(&mut self) -> u32 {
        let mut cycles = 0;
        loop {
            self.clock();
            cycles += 1;
            if self.remaining == 0 {
                return cycles;
            }
        }
    }

    /// Test a status flag (one of the `flags` masks).
    #[must_use]
    pub fn get_flag(&self, flag: u8) -> bool {
        self.regs.p.is_set(flag)
    }

    pub(crate) fn set_flag(&mut self, flag: u8, value: bool) {
        self.regs.p.set_if(flag, value);
    }

    /// Read memory without side effects.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.bus.peek(address)
    }

    #[must_use]
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    #[must_use]
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    #[must_use]
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    #[must_use]
    pub fn s(&self) -> u8 {
        self.regs.s
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.regs.p
    }

    /// Overwrite the register file.
    ///
    /// For harnesses that restore a saved machine state. Cycle accounting is
    /// left alone.
    pub fn set_registers(&mut self, regs: Registers) {
        self.regs = regs;
    }

    /// Cycles clocked since construction or the last reset.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Cycles left before the next fetch.
    #[must_use]
    pub fn remaining_cycles(&self) -> u8 {
        self.remaining
    }

    /// Opcode byte of the last instruction fetched.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Descriptor of the last instruction fetched.
    #[must_use]
    pub fn instruction(&self) -> &'static Instruction {
        lookup(self.opcode)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    // ------------------------------------------------------------------
    // Bus helpers
    // ------------------------------------------------------------------

    pub(crate) fn read(&mut self, address: u16) -> u8 {
        self.bus.read(address)
    }

    pub(crate) fn write(&mut self, address: u16, value: u8) {
        self.bus.write(address, value);
    }

    pub(crate) fn read_word(&mut self, address: u16) -> u16 {
        let lo = self.read(address);
        let hi = self.read(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn push(&mut self, value: u8) {
        let addr = self.regs.push();
        self.write(addr, value);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        let addr = self.regs.pop();
        self.read(addr)
    }

    /// Push high byte first so the word sits little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }

    // ------------------------------------------------------------------
    // Sequencing
    // ------------------------------------------------------------------

    /// Fetch, decode and execute one instruction, charging its cost.
    fn begin_instruction(&mut self) {
        let pc = self.regs.pc;
        self.opcode = self.fetch_byte();
        let instruction = lookup(self.opcode);

        if log_enabled!(Level::Trace) {
            trace!(
                "${pc:04X}: {:02X} {} {}",
                self.opcode, instruction.mnemonic, instruction.mode
            );
        }

        self.remaining = instruction.cycles;
        let mode_extra = self.resolve(instruction.mode);
        let op_extra = self.execute(instruction.mnemonic);
        // Both sides must agree: STA abs,X never pays for the page cross,
        // LDA abs never has one to pay for.
        self.remaining += mode_extra & op_extra;
    }

    /// Service a latched interrupt at an instruction boundary.
    ///
    /// Returns true if an interrupt sequence was started.
    fn service_pending_interrupt(&mut self) -> bool {
        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(NMI_VECTOR, NMI_CYCLES);
            return true;
        }
        if self.irq_pending {
            self.irq_pending = false;
            if self.regs.p.is_set(I) {
                trace!("latched IRQ dropped: interrupts disabled");
                return false;
            }
            self.interrupt(IRQ_VECTOR, IRQ_CYCLES);
            return true;
        }
        false
    }

    /// Push PC and status, mask IRQs and jump through `vector`.
    fn interrupt(&mut self, vector: u16, cycles: u8) {
        let return_pc = self.regs.pc;
        self.push_word(return_pc);
        let status = self.regs.p.to_byte_irq();
        self.push(status);
        self.regs.p.set_if(B, false);
        self.regs.p.set_if(I, true);
        self.regs.pc = self.read_word(vector);
        self.remaining = cycles;
        debug!(
            "interrupt via ${vector:04X}: ${return_pc:04X} -> ${:04X}",
            self.regs.pc
        );
    }
}

impl<B: Bus> Cpu for R6502<B> {
    type Registers = Registers;

    fn clock(&mut self) {
        if self.remaining == 0 && !self.service_pending_interrupt() {
            self.begin_instruction();
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.total_cycles += 1;
    }

    fn reset(&mut self) {
        self.regs = Registers::new();
        self.regs.pc = self.read_word(RESET_VECTOR);
        self.opcode = 0;
        self.operand = Operand::Implied;
        self.data = 0;
        self.irq_pending = false;
        self.nmi_pending = false;
        self.remaining = RESET_CYCLES;
        self.total_cycles = 0;
        debug!("reset: PC=${:04X}", self.regs.pc);
    }

    fn irq(&mut self) {
        if self.remaining > 0 {
            trace!("IRQ latched ({} cycles in flight)", self.remaining);
            self.irq_pending = true;
        } else if self.regs.p.is_set(I) {
            trace!("IRQ ignored: interrupts disabled");
        } else {
            self.interrupt(IRQ_VECTOR, IRQ_CYCLES);
        }
    }

    fn nmi(&mut self) {
        if self.remaining > 0 {
            trace!("NMI latched ({} cycles in flight)", self.remaining);
            self.nmi_pending = true;
        } else {
            self.interrupt(NMI_VECTOR, NMI_CYCLES);
        }
    }

    fn is_instruction_complete(&self) -> bool {
        self.remaining == 0
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }
}

impl<B: Bus> Tickable for R6502<B> {
    fn tick(&mut self) {
        self.clock();
    }
}

impl<B: Bus> Observable for R6502<B> {
    fn query(&self, path: &str) -> Option<Value> {
        let p = self.regs.p;
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(p.bits().into()),
            "flags.c" => Some(p.is_set(C).into()),
            "flags.z" => Some(p.is_set(Z).into()),
            "flags.i" => Some(p.is_set(I).into()),
            "flags.d" => Some(p.is_set(D).into()),
            "flags.b" => Some(p.is_set(B).into()),
            "flags.v" => Some(p.is_set(V).into()),
            "flags.n" => Some(p.is_set(N).into()),
            "cycle" => Some(self.total_cycles.into()),
            "remaining" => Some(self.remaining.into()),
            "opcode" => Some(self.opcode.into()),
            "mnemonic" => Some(self.instruction().mnemonic.name().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc",
            "a",
            "x",
            "y",
            "s",
            "p",
            "flags.c",
            "flags.z",
            "flags.i",
            "flags.d",
            "flags.b",
            "flags.v",
            "flags.n",
            "cycle",
            "remaining",
            "opcode",
            "mnemonic",
        ]
    }
}
