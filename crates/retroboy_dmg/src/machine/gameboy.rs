use anyhow::{ensure, Context};

use crate::config::CoreConfig;
use crate::cpu::{Bus, Cpu, Interrupt, Registers};

use super::bus::ROM_WINDOW;
use super::serial::SerialSink;
use super::GameBoyBus;

/// End of the cartridge header (0x0100..=0x014F).
const CARTRIDGE_HEADER_END: usize = 0x150;
const TITLE: std::ops::Range<usize> = 0x134..0x144;
const CARTRIDGE_TYPE: usize = 0x147;

/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus. This is the main entry point for hosts:
/// load a ROM with [`GameBoy::init`], then call [`GameBoy::step`] in a loop.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    config: CoreConfig,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    pub fn with_config(config: CoreConfig) -> Self {
        let mut bus = GameBoyBus::default();
        bus.serial.capture = config.capture_serial;
        Self {
            cpu: Cpu::with_policy(config.unknown_opcode),
            bus,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Reset the machine to the DMG post-boot state and map `rom` at
    /// 0x0000.
    ///
    /// The image must hold at least a full cartridge header. Only the first
    /// 32 KiB are mapped; anything beyond would need an MBC.
    pub fn init(&mut self, rom: &[u8]) -> anyhow::Result<()> {
        validate_rom(rom).with_context(|| format!("invalid ROM image ({} bytes)", rom.len()))?;

        let title = cartridge_title(rom);
        let cart_type = rom[CARTRIDGE_TYPE];
        log::info!(
            "GB ROM loaded: title={title:?} size={} bytes cartridge type=0x{cart_type:02X}",
            rom.len(),
        );
        if !matches!(cart_type, 0x00 | 0x08 | 0x09) {
            log::warn!(
                "GB ROM header announces cartridge type 0x{cart_type:02X}; MBC banking is not emulated"
            );
        }
        if rom.len() > ROM_WINDOW {
            log::warn!(
                "GB ROM is {} bytes; only the first {} bytes are mapped",
                rom.len(),
                ROM_WINDOW,
            );
        }

        self.cpu.reset();
        self.bus.reset();
        self.bus.load_rom(rom);
        // PC is already initialised to 0x0100 by the simulated boot state.
        Ok(())
    }

    /// Execute one instruction (or interrupt dispatch) and return the
    /// machine cycles it took. Returns 0 once the CPU has locked up.
    pub fn step(&mut self) -> u32 {
        self.cpu.step(&mut self.bus)
    }

    /// Read a byte through the memory map, as the CPU would.
    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.bus.read8(addr)
    }

    /// Write a byte through the memory map. Unlike a CPU store, writes to
    /// the ROM area land, so programs can be patched before stepping.
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.bus.poke(addr, value);
    }

    pub fn snapshot_registers(&self) -> Registers {
        self.cpu.regs
    }

    /// Raise interrupt requests in IF on behalf of a peripheral.
    pub fn request_interrupt(&mut self, irq: Interrupt) {
        self.bus.if_reg |= irq.bits();
    }

    /// Install an observer for writes to SB/SC, replacing any previous one.
    pub fn set_serial_sink<S>(&mut self, sink: S)
    where
        S: SerialSink + 'static,
    {
        self.bus.serial.set_sink(Some(Box::new(sink)));
    }

    pub fn clear_serial_sink(&mut self) {
        self.bus.serial.set_sink(None);
    }

    /// Bytes sent over the serial port since the last `init`.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }
}

fn validate_rom(rom: &[u8]) -> anyhow::Result<()> {
    ensure!(!rom.is_empty(), "ROM image is empty");
    ensure!(
        rom.len() >= CARTRIDGE_HEADER_END,
        "ROM image is {} bytes, shorter than the 0x{:X}-byte cartridge header",
        rom.len(),
        CARTRIDGE_HEADER_END,
    );
    Ok(())
}

fn cartridge_title(rom: &[u8]) -> String {
    let raw = &rom[TITLE];
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim_end().to_string()
}
