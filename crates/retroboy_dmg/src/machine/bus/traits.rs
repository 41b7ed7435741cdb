use crate::cpu::Bus;
use crate::TCYCLES_PER_MCYCLE;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    fn advance(&mut self, mcycles: u32) {
        self.tick(mcycles * TCYCLES_PER_MCYCLE);
    }
}
