use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn read8_mmio(&mut self, addr: u16) -> u8 {
        match addr {
            // Echo RAM mirrors 0xC000..=0xDDFF.
            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize],

            // Serial transfer registers.
            0xFF01 => self.serial.sb,
            0xFF02 => self.serial.sc,

            0xFF04..=0xFF07 => self.timer.read(addr),

            // Interrupt flags: upper 3 bits always read as 1.
            0xFF0F => self.if_reg | 0xE0,

            // Boot ROM disable latch is write-only.
            0xFF50 => 0xFF,

            0xFFFF => self.ie_reg,

            _ => self.memory[addr as usize],
        }
    }
}
