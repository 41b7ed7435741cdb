use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            // Cartridge ROM. Without an MBC, CPU writes have no effect.
            0x0000..=0x7FFF => {
                log::trace!("GB bus: ignored write 0x{value:02X} to ROM 0x{addr:04X}");
            }

            // Echo RAM: writes land in the underlying WRAM so that code
            // observing either address sees a coherent value.
            0xE000..=0xFDFF => {
                self.memory[(addr - 0x2000) as usize] = value;
            }

            // Serial transfer registers.
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => self.serial.write_sc(value),

            0xFF04..=0xFF07 => self.timer.write(addr, value),

            // Interrupt flags and enable.
            0xFF0F => {
                // Only lower 5 bits are writable; upper bits always read as 1.
                self.if_reg = value & 0x1F;
            }
            0xFFFF => {
                self.ie_reg = value;
            }

            0xFF50 => {
                let previous = std::mem::replace(&mut self.boot_latch, value);
                log::debug!("GB bus: boot ROM latch 0x{previous:02X} -> 0x{value:02X}");
            }

            _ => {
                self.memory[addr as usize] = value;
            }
        }
    }
}
