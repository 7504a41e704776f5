//! Klaus Dormann's 6502 functional and decimal test harness.
//!
//! Both binaries are assembled with load address $0000 and signal their
//! result by trapping: a branch or jump to itself.
//! - Functional test: entry $0400, success trap at $3469.
//! - Decimal test: entry $0200, error flag at $000B (zero on success).

use emu_core::{Cpu, SimpleBus};
use rockwell_6502::{R6502, Registers};

/// Run from `entry` until the PC stops moving, returning the trap address.
fn run_to_trap(cpu: &mut R6502<SimpleBus>, entry: u16, limit: u64) -> Option<u16> {
    let mut regs = Registers::new();
    regs.pc = entry;
    cpu.set_registers(regs);

    let mut instructions: u64 = 0;
    let mut prev_pc: u16 = entry.wrapping_sub(1);
    let mut same_pc_count = 0;

    loop {
        let start_pc = cpu.pc();
        if start_pc == prev_pc {
            same_pc_count += 1;
            if same_pc_count > 2 {
                eprintln!(
                    "\nTrapped at ${start_pc:04X} after {instructions} instructions ({} cycles)",
                    cpu.total_cycles()
                );
                return Some(start_pc);
            }
        } else {
            same_pc_count = 0;
            prev_pc = start_pc;
        }

        cpu.step();
        instructions += 1;

        if instructions % 100_000 == 0 {
            eprint!("\r[{instructions} instructions, PC=${:04X}]", cpu.pc());
        }
        if instructions > limit {
            eprintln!("\nExceeded {limit} instructions");
            return None;
        }
    }
}

fn load(path: &str) -> R6502<SimpleBus> {
    let binary = std::fs::read(path)
        .unwrap_or_else(|e| panic!("{path} not found ({e}) - download from Klaus Dormann's repository"));
    let mut bus = SimpleBus::new();
    bus.load(0x0000, &binary).expect("binary fits in 64 KB");
    R6502::new(bus)
}

#[test]
#[ignore = "requires tests/data/6502_functional_test.bin"]
fn dormann_functional() {
    let mut cpu = load("tests/data/6502_functional_test.bin");
    let trap = run_to_trap(&mut cpu, 0x0400, 100_000_000);
    assert_eq!(trap, Some(0x3469), "functional test trapped early");
}

#[test]
#[ignore = "requires tests/data/6502_decimal_test.bin"]
fn dormann_decimal() {
    let mut cpu = load("tests/data/6502_decimal_test.bin");
    let trap = run_to_trap(&mut cpu, 0x0200, 50_000_000);
    assert!(trap.is_some(), "decimal test never finished");

    let error = cpu.peek(0x000B);
    if error != 0 {
        // Zero-page layout: $00=N1, $01=N2, $04=DA, $05=DNVZC, $06=AR, $0A=CF
        eprintln!(
            "N1=${:02X} N2=${:02X} carry_in={} actual A=${:02X} P=${:02X} predicted A=${:02X} C=${:02X}",
            cpu.peek(0x00),
            cpu.peek(0x01),
            cpu.y(),
            cpu.peek(0x04),
            cpu.peek(0x05),
            cpu.peek(0x06),
            cpu.peek(0x0A),
        );
    }
    assert_eq!(error, 0, "decimal test reported an error");
}
