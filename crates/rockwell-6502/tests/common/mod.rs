//! Tom Harte `SingleStepTests` case format and runner.
//!
//! Only the final state and the number of bus cycles are compared; the
//! engine does not model individual bus accesses.

#![allow(dead_code)]

use emu_core::{Bus, Cpu, SimpleBus};
use rockwell_6502::{R6502, Registers, Status};
use serde::Deserialize;

/// JSON test case format.
#[derive(Deserialize)]
pub struct TestCase {
    pub name: String,
    pub initial: CpuState,
    #[serde(rename = "final")]
    pub final_state: CpuState,
    pub cycles: Vec<(u16, u8, String)>,
}

/// JSON CPU state format.
#[derive(Deserialize)]
pub struct CpuState {
    pub pc: u16,
    pub s: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub ram: Vec<(u16, u8)>,
}

/// Build a CPU from the initial state of a case.
fn setup(state: &CpuState) -> R6502<SimpleBus> {
    let mut bus = SimpleBus::new();
    for &(addr, value) in &state.ram {
        bus.write(addr, value);
    }
    let mut cpu = R6502::new(bus);
    cpu.set_registers(Registers {
        a: state.a,
        x: state.x,
        y: state.y,
        s: state.s,
        pc: state.pc,
        p: Status::from_byte(state.p),
    });
    cpu
}

/// Compare the CPU/bus state against expected, returning a list of mismatches.
fn compare(cpu: &R6502<SimpleBus>, expected: &CpuState) -> Vec<String> {
    let mut errors = Vec::new();
    let regs = cpu.registers();

    if regs.pc != expected.pc {
        errors.push(format!("PC: got ${:04X}, want ${:04X}", regs.pc, expected.pc));
    }
    for (name, got, want) in [
        ("S", regs.s, expected.s),
        ("A", regs.a, expected.a),
        ("X", regs.x, expected.x),
        ("Y", regs.y, expected.y),
    ] {
        if got != want {
            errors.push(format!("{name}: got ${got:02X}, want ${want:02X}"));
        }
    }

    let actual_p = regs.p.bits();
    let expected_p = expected.p | rockwell_6502::flags::U;
    if actual_p != expected_p {
        errors.push(format!(
            "P: got ${actual_p:02X} ({actual_p:08b}), want ${expected_p:02X} ({expected_p:08b})"
        ));
    }

    for &(addr, want) in &expected.ram {
        let got = cpu.peek(addr);
        if got != want {
            errors.push(format!("RAM[${addr:04X}]: got ${got:02X}, want ${want:02X}"));
        }
    }

    errors
}

/// Run one case, returning a failure description on mismatch.
pub fn run_case(case: &TestCase) -> Result<(), String> {
    let mut cpu = setup(&case.initial);
    let cycles = cpu.step();

    let mut errors = compare(&cpu, &case.final_state);
    let want = case.cycles.len();
    if usize::try_from(cycles).ok() != Some(want) {
        errors.push(format!("cycles: got {cycles}, want {want}"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("[{}]: {}", case.name, errors.join(", ")))
    }
}
