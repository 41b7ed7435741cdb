use super::{serial::Serial, timer::Timer, MEMORY_SIZE};

mod init;
mod read;
mod traits;
mod write;

/// Size of the flat cartridge ROM window (banks 0 and 1, no MBC).
pub(super) const ROM_WINDOW: usize = 0x8000;

pub(crate) struct GameBoyBus {
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) serial: Serial,
    /// IF (0xFF0F), lower 5 bits only; reads OR in 0xE0.
    pub(crate) if_reg: u8,
    /// IE (0xFFFF).
    pub(crate) ie_reg: u8,
    /// Boot ROM disable latch (0xFF50). Written values are kept but never
    /// read back; there is no boot ROM overlay to unmap.
    pub(crate) boot_latch: u8,
    /// Timer / divider state.
    pub(super) timer: Timer,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        let mut bus = Self {
            memory: [0; MEMORY_SIZE],
            serial: Serial::default(),
            if_reg: 0,
            ie_reg: 0,
            boot_latch: 0,
            timer: Timer::new(),
        };
        bus.apply_dmg_initial_io_state();
        bus
    }
}

impl GameBoyBus {
    /// Return the bus to its post-boot state. The serial sink and the
    /// capture setting are kept.
    pub(super) fn reset(&mut self) {
        self.apply_dmg_initial_io_state();
    }

    /// Copy a ROM image into the cartridge area starting at 0x0000.
    ///
    /// Only the first 32 KiB are mapped; callers validate the image first.
    pub(super) fn load_rom(&mut self, rom: &[u8]) {
        let len = rom.len().min(ROM_WINDOW);
        self.memory[..len].copy_from_slice(&rom[..len]);
    }

    /// Host-side store. Same map as a CPU write, except the ROM window is
    /// plain memory so code can be patched in place.
    pub(super) fn poke(&mut self, addr: u16, value: u8) {
        match addr as usize {
            index if index < ROM_WINDOW => self.memory[index] = value,
            _ => self.write8_mmio(addr, value),
        }
    }

    /// Advance bus-side peripherals by `tcycles` T-cycles.
    pub(crate) fn tick(&mut self, tcycles: u32) {
        self.timer.tick(tcycles, &mut self.if_reg);
    }
}
