use super::{Timer, TIMA_PERIODS};

impl Timer {
    /// Read one of the timer registers (0xFF04..=0xFF07).
    pub(in super::super) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => self.div,
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            0xFF07 => self.tac | 0b1111_1000,
            _ => 0xFF,
        }
    }

    /// Write one of the timer registers (0xFF04..=0xFF07).
    pub(in super::super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // Writing any value to DIV resets it along with the sub-cycle
            // accumulator feeding it.
            0xFF04 => {
                self.div = 0;
                self.div_counter = 0;
            }
            0xFF05 => self.tima = value,
            0xFF06 => self.tma = value,
            0xFF07 => self.write_tac(value),
            _ => {}
        }
    }

    fn write_tac(&mut self, value: u8) {
        self.tac = value & 0x07;
        self.enabled = (value & 0x04) != 0;
        self.period = TIMA_PERIODS[(value & 0x03) as usize];
    }
}
