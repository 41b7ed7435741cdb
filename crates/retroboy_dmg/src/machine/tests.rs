use std::cell::RefCell;
use std::rc::Rc;

use super::{timer::Timer, GameBoy, SerialPort};
use crate::config::{CoreConfig, UnknownOpcodePolicy};
use crate::cpu::{Interrupt, Registers};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 32 KiB ROM with `program` at the entry point and a readable title.
fn rom_with_program(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom[0x0134..0x0138].copy_from_slice(b"TEST");
    rom
}

fn machine_with_program(program: &[u8]) -> GameBoy {
    init_logger();
    let mut gb = GameBoy::new();
    gb.init(&rom_with_program(program))
        .expect("test ROM should be accepted");
    gb
}

#[test]
fn timer_fast_clock_wraps_tima_once_per_256_increments() {
    let mut timer = Timer::new();
    let mut if_reg = 0u8;
    timer.write(0xFF07, 0x05);
    assert!(timer.enabled);
    assert_eq!(timer.period, 16);

    for _ in 0..255 {
        timer.tick(16, &mut if_reg);
    }
    assert_eq!(timer.tima, 0xFF);
    assert_eq!(if_reg, 0x00);

    timer.tick(16, &mut if_reg);
    assert_eq!(timer.tima, 0x00);
    assert_eq!(if_reg, 0x04);

    // Same amount of time in a single call.
    let mut timer = Timer::new();
    let mut if_reg = 0u8;
    timer.write(0xFF07, 0x05);
    timer.tick(16 * 256, &mut if_reg);
    assert_eq!(timer.tima, 0x00);
    assert_eq!(if_reg, 0x04);
}

#[test]
fn timer_overflow_reloads_from_tma() {
    let mut timer = Timer::new();
    let mut if_reg = 0x01u8;
    timer.write(0xFF06, 0xF0);
    timer.write(0xFF05, 0xFF);
    timer.write(0xFF07, 0x05);

    timer.tick(15, &mut if_reg);
    assert_eq!(timer.tima, 0xFF);

    timer.tick(1, &mut if_reg);
    assert_eq!(timer.tima, 0xF0);
    assert_eq!(if_reg, 0x05);
}

#[test]
fn timer_clock_select_periods() {
    for (tac, period) in [(0x04u8, 1024u32), (0x05, 16), (0x06, 64), (0x07, 256)] {
        let mut timer = Timer::new();
        let mut if_reg = 0u8;
        timer.write(0xFF07, tac);

        timer.tick(period - 1, &mut if_reg);
        assert_eq!(timer.tima, 0, "TAC=0x{tac:02X}");
        timer.tick(1, &mut if_reg);
        assert_eq!(timer.tima, 1, "TAC=0x{tac:02X}");
    }
}

#[test]
fn timer_disabled_only_runs_divider() {
    let mut timer = Timer::new();
    let mut if_reg = 0u8;
    timer.write(0xFF07, 0x01);
    assert!(!timer.enabled);

    timer.tick(4096, &mut if_reg);
    assert_eq!(timer.tima, 0);
    assert_eq!(timer.read(0xFF04), 16);
    assert_eq!(if_reg, 0);
}

#[test]
fn div_increments_every_256_tcycles_and_resets_on_write() {
    let mut timer = Timer::new();
    let mut if_reg = 0u8;

    timer.tick(255, &mut if_reg);
    assert_eq!(timer.read(0xFF04), 0);
    timer.tick(1, &mut if_reg);
    assert_eq!(timer.read(0xFF04), 1);

    timer.tick(200, &mut if_reg);
    timer.write(0xFF04, 0x5A);
    assert_eq!(timer.read(0xFF04), 0);

    // The sub-cycle accumulator was cleared too.
    timer.tick(255, &mut if_reg);
    assert_eq!(timer.read(0xFF04), 0);
    timer.tick(1, &mut if_reg);
    assert_eq!(timer.read(0xFF04), 1);
}

#[test]
fn div_wraps_after_256_increments() {
    let mut timer = Timer::new();
    let mut if_reg = 0u8;
    timer.init_dmg();
    assert_eq!(timer.read(0xFF04), 0xAB);

    timer.tick(256 * (0x100 - 0xAB), &mut if_reg);
    assert_eq!(timer.read(0xFF04), 0x00);
}

#[test]
fn tac_reads_back_with_upper_bits_set() {
    let mut timer = Timer::new();
    assert_eq!(timer.read(0xFF07), 0xF8);

    timer.write(0xFF07, 0x05);
    assert_eq!(timer.read(0xFF07), 0xFD);

    timer.write(0xFF07, 0xFF);
    assert_eq!(timer.read(0xFF07), 0xFF);
    assert!(timer.enabled);
    assert_eq!(timer.period, 256);

    timer.write(0xFF06, 0x12);
    timer.write(0xFF05, 0x34);
    assert_eq!(timer.read(0xFF06), 0x12);
    assert_eq!(timer.read(0xFF05), 0x34);
}

#[test]
fn post_init_state_matches_dmg_boot() {
    let mut gb = machine_with_program(&[]);

    assert_eq!(gb.snapshot_registers(), Registers::dmg_post_boot());
    let regs = gb.snapshot_registers();
    assert_eq!(regs.a, 0x01);
    assert_eq!(regs.f, 0xB0);
    assert_eq!(regs.pc, 0x0100);
    assert_eq!(regs.sp, 0xFFFE);

    assert_eq!(gb.read_memory(0xFF0F), 0xE1);
    assert_eq!(gb.read_memory(0xFFFF), 0x00);
    assert_eq!(gb.read_memory(0xFF04), 0xAB);
    assert_eq!(gb.read_memory(0xFF05), 0x00);
    assert_eq!(gb.read_memory(0xFF06), 0x00);
    assert_eq!(gb.read_memory(0xFF07), 0xF8);
    assert!(!gb.cpu.ime());

    // Sound and LCD registers are not modelled and start out as zeroed RAM.
    assert_eq!(gb.read_memory(0xFF26), 0x00);
    assert_eq!(gb.read_memory(0xFF40), 0x00);
}

#[test]
fn bus_advance_drives_timer() {
    let mut gb = machine_with_program(&[]);
    gb.write_memory(0xFF0F, 0x00);
    gb.write_memory(0xFF07, 0x05);
    gb.write_memory(0xFF05, 0xFF);

    // Three NOPs are 12 T-cycles: not enough for one increment.
    for _ in 0..3 {
        assert_eq!(gb.step(), 1);
    }
    assert_eq!(gb.read_memory(0xFF05), 0xFF);
    assert_eq!(gb.read_memory(0xFF0F), 0xE0);

    gb.step();
    assert_eq!(gb.read_memory(0xFF05), 0x00);
    assert_eq!(gb.read_memory(0xFF0F), 0xE4);
}

#[test]
fn interrupt_dispatch_through_machine() {
    let mut gb = machine_with_program(&[]);
    gb.cpu.interrupts.enable_now();
    gb.cpu.regs.pc = 0x1234;
    gb.write_memory(0xFFFF, 0xFF);

    assert_eq!(gb.step(), 5);

    let regs = gb.snapshot_registers();
    assert_eq!(regs.pc, 0x0040);
    assert_eq!(regs.sp, 0xFFFC);
    assert_eq!(gb.read_memory(0xFFFD), 0x12);
    assert_eq!(gb.read_memory(0xFFFC), 0x34);
    assert_eq!(gb.read_memory(0xFF0F), 0xE0);
    assert!(!gb.cpu.ime());
}

#[test]
fn timer_interrupt_reaches_vector() {
    // EI ; JR -2
    let mut gb = machine_with_program(&[0xFB, 0x18, 0xFE]);
    gb.write_memory(0xFF0F, 0x00);
    gb.write_memory(0xFFFF, Interrupt::TIMER.bits());
    gb.write_memory(0xFF05, 0xFE);
    gb.write_memory(0xFF07, 0x05);

    let mut reached = false;
    for _ in 0..64 {
        gb.step();
        if gb.cpu.regs.pc == 0x0050 {
            reached = true;
            break;
        }
    }

    assert!(reached, "timer interrupt was never serviced");
    assert_eq!(gb.read_memory(0xFF0F) & 0x04, 0);
    assert!(!gb.cpu.ime());
}

#[test]
fn halt_is_woken_by_timer_request() {
    // HALT ; NOP
    let mut gb = machine_with_program(&[0x76, 0x00]);
    gb.write_memory(0xFF0F, 0x00);
    gb.write_memory(0xFFFF, Interrupt::TIMER.bits());
    gb.write_memory(0xFF05, 0xFF);
    gb.write_memory(0xFF07, 0x05);

    gb.step();
    assert!(gb.cpu.halted);

    for _ in 0..8 {
        gb.step();
        if !gb.cpu.halted {
            break;
        }
    }

    assert!(!gb.cpu.halted);
    assert_eq!(gb.cpu.regs.pc, 0x0102);
    assert_ne!(gb.read_memory(0xFF0F) & 0x04, 0);
}

#[test]
fn stop_freezes_timer_until_joypad_request() {
    // STOP ; NOP
    let mut gb = machine_with_program(&[0x10, 0x00, 0x00]);
    gb.write_memory(0xFF07, 0x05);

    gb.step();
    assert!(gb.cpu.is_stopped());
    let div = gb.read_memory(0xFF04);
    let tima = gb.read_memory(0xFF05);

    for _ in 0..100 {
        assert_eq!(gb.step(), 1);
    }
    assert_eq!(gb.read_memory(0xFF04), div);
    assert_eq!(gb.read_memory(0xFF05), tima);
    assert_eq!(gb.cpu.regs.pc, 0x0102);

    gb.request_interrupt(Interrupt::JOYPAD);
    gb.step();
    assert!(!gb.cpu.is_stopped());
    assert_eq!(gb.cpu.regs.pc, 0x0103);
}

#[test]
fn request_interrupt_sets_if_bits() {
    let mut gb = machine_with_program(&[]);
    gb.request_interrupt(Interrupt::TIMER | Interrupt::JOYPAD);
    assert_eq!(gb.read_memory(0xFF0F), 0xF5);
}

#[test]
fn if_upper_bits_read_as_one() {
    let mut gb = machine_with_program(&[]);

    gb.write_memory(0xFF0F, 0x00);
    assert_eq!(gb.read_memory(0xFF0F), 0xE0);

    gb.write_memory(0xFF0F, 0xFF);
    assert_eq!(gb.read_memory(0xFF0F), 0xFF);
    assert_eq!(gb.bus.if_reg, 0x1F);
}

#[test]
fn boot_rom_latch_reads_ff() {
    let mut gb = machine_with_program(&[]);
    assert_eq!(gb.read_memory(0xFF50), 0xFF);

    gb.write_memory(0xFF50, 0x01);
    assert_eq!(gb.read_memory(0xFF50), 0xFF);
    assert_eq!(gb.bus.boot_latch, 0x01);
    assert_eq!(gb.read_memory(0x0000), 0x00);
}

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut gb = machine_with_program(&[]);

    gb.write_memory(0xE000, 0x12);
    assert_eq!(gb.read_memory(0xC000), 0x12);

    gb.write_memory(0xC123, 0x34);
    assert_eq!(gb.read_memory(0xE123), 0x34);

    gb.write_memory(0xFDFF, 0x56);
    assert_eq!(gb.read_memory(0xDDFF), 0x56);
}

#[test]
fn cpu_stores_to_rom_are_ignored() {
    // LD A,0x55 ; LD (0x0100),A ; LD (0x7FFF),A
    let mut gb = machine_with_program(&[0x3E, 0x55, 0xEA, 0x00, 0x01, 0xEA, 0xFF, 0x7F]);

    assert_eq!(gb.step(), 2);
    assert_eq!(gb.step(), 4);
    assert_eq!(gb.step(), 4);
    assert_eq!(gb.read_memory(0x0100), 0x3E);
    assert_eq!(gb.read_memory(0x7FFF), 0x00);

    // RAM regions are plain storage.
    gb.write_memory(0x8000, 0x01);
    gb.write_memory(0xA000, 0x02);
    gb.write_memory(0xFF80, 0x03);
    assert_eq!(gb.read_memory(0x8000), 0x01);
    assert_eq!(gb.read_memory(0xA000), 0x02);
    assert_eq!(gb.read_memory(0xFF80), 0x03);
}

#[test]
fn write_memory_can_patch_rom_before_stepping() {
    let mut gb = machine_with_program(&[]);

    // JP 0x1234 at the entry point.
    gb.write_memory(0x0100, 0xC3);
    gb.write_memory(0x0101, 0x34);
    gb.write_memory(0x0102, 0x12);
    gb.write_memory(0x7FFF, 0x99);
    assert_eq!(gb.read_memory(0x0100), 0xC3);
    assert_eq!(gb.read_memory(0x7FFF), 0x99);

    assert_eq!(gb.step(), 4);
    assert_eq!(gb.snapshot_registers().pc, 0x1234);
}

#[test]
fn snapshot_reflects_every_register_after_a_program() {
    let mut gb = machine_with_program(&[
        0x3E, 0x12, // LD A,0x12
        0x06, 0x34, // LD B,0x34
        0x0E, 0x56, // LD C,0x56
        0x16, 0x78, // LD D,0x78
        0x1E, 0x9A, // LD E,0x9A
        0x26, 0xBC, // LD H,0xBC
        0x2E, 0xDE, // LD L,0xDE
        0x31, 0x00, 0xD0, // LD SP,0xD000
        0x37, // SCF
    ]);

    let cycles: u32 = (0..9).map(|_| gb.step()).sum();
    assert_eq!(cycles, 7 * 2 + 3 + 1);

    assert_eq!(
        gb.snapshot_registers(),
        Registers {
            a: 0x12,
            // SCF keeps Z from boot, clears N and H, sets C.
            f: 0x90,
            b: 0x34,
            c: 0x56,
            d: 0x78,
            e: 0x9A,
            h: 0xBC,
            l: 0xDE,
            sp: 0xD000,
            pc: 0x0112,
        }
    );
}

#[test]
fn init_rejects_empty_and_truncated_roms() {
    init_logger();
    let mut gb = GameBoy::new();

    let err = gb.init(&[]).expect_err("empty ROM must be rejected");
    assert!(format!("{err:#}").contains("empty"));

    let err = gb
        .init(&[0u8; 0x100])
        .expect_err("ROM without a full header must be rejected");
    let message = format!("{err:#}");
    assert!(message.contains("256 bytes"), "{message}");

    assert!(gb.init(&[0u8; 0x150]).is_ok());
}

#[test]
fn init_maps_only_first_32k_of_large_roms() {
    init_logger();
    let mut rom = vec![0xEEu8; 0x10000];
    rom[0x0147] = 0x01;
    rom[0x7FFF] = 0x42;

    let mut gb = GameBoy::new();
    gb.init(&rom).expect("oversized ROM is accepted with a warning");

    assert_eq!(gb.read_memory(0x7FFF), 0x42);
    assert_eq!(gb.read_memory(0x8000), 0x00);
}

#[test]
fn init_resets_a_locked_machine() {
    let config = CoreConfig::builder()
        .unknown_opcode(UnknownOpcodePolicy::Lock)
        .build();
    let rom = rom_with_program(&[0xD3]);

    init_logger();
    let mut gb = GameBoy::with_config(config);
    gb.init(&rom).expect("test ROM should be accepted");

    assert_eq!(gb.step(), 1);
    assert!(gb.cpu.is_locked());
    assert_eq!(gb.step(), 0);

    gb.init(&rom).expect("test ROM should be accepted");
    assert!(!gb.cpu.is_locked());
    assert_eq!(gb.snapshot_registers().pc, 0x0100);
    assert_eq!(gb.config().unknown_opcode, UnknownOpcodePolicy::Lock);
}

#[test]
fn serial_sink_sees_every_sb_sc_write() {
    let mut gb = machine_with_program(&[]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    gb.set_serial_sink(move |port: SerialPort, value: u8| {
        sink.borrow_mut().push((port, value))
    });

    gb.write_memory(SerialPort::Data.addr(), b'A');
    gb.write_memory(SerialPort::Control.addr(), 0x81);

    assert_eq!(
        *seen.borrow(),
        vec![(SerialPort::Data, b'A'), (SerialPort::Control, 0x81)]
    );
    assert_eq!(gb.serial_output(), b"A");
    // Transfer start bit is cleared once the byte is captured.
    assert_eq!(gb.read_memory(0xFF02), 0x01);

    gb.clear_serial_sink();
    gb.write_memory(0xFF01, b'B');
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn serial_capture_can_be_disabled() {
    init_logger();
    let config = CoreConfig::builder().capture_serial(false).build();
    let mut gb = GameBoy::with_config(config);
    gb.init(&rom_with_program(&[]))
        .expect("test ROM should be accepted");

    gb.write_memory(0xFF01, b'A');
    gb.write_memory(0xFF02, 0x81);

    assert!(gb.serial_output().is_empty());
    assert_eq!(gb.read_memory(0xFF02), 0x81);
}

#[test]
fn program_output_over_serial_is_captured() {
    let mut gb = machine_with_program(&[
        0x3E, b'O', // LD A, 'O'
        0xE0, 0x01, // LDH (SB), A
        0x3E, 0x81, // LD A, 0x81
        0xE0, 0x02, // LDH (SC), A
        0x3E, b'K', // LD A, 'K'
        0xE0, 0x01, // LDH (SB), A
        0x3E, 0x81, // LD A, 0x81
        0xE0, 0x02, // LDH (SC), A
    ]);

    for _ in 0..8 {
        gb.step();
    }

    assert_eq!(gb.serial_output(), b"OK");

    // Re-initialising clears the captured bytes.
    gb.init(&rom_with_program(&[]))
        .expect("test ROM should be accepted");
    assert!(gb.serial_output().is_empty());
}

#[test]
fn unknown_opcode_is_a_one_cycle_nop_by_default() {
    let mut gb = machine_with_program(&[0xDB, 0x00]);

    assert_eq!(gb.step(), 1);
    assert_eq!(gb.snapshot_registers().pc, 0x0101);
    assert!(!gb.cpu.is_locked());
}
