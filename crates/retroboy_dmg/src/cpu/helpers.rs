use super::decode::{Cond, Indirect};
use super::{Bus, Cpu, Flag, Loc8};

impl Cpu {
    /// Read an 8-bit operand: a register, or the byte at (HL).
    #[inline]
    pub(super) fn read_loc<B: Bus>(&mut self, bus: &mut B, loc: Loc8) -> u8 {
        match loc {
            Loc8::Reg(reg) => self.regs.get(reg),
            Loc8::Hl => bus.read8(self.regs.hl()),
        }
    }

    /// Write an 8-bit operand. The encoding matches `read_loc`.
    #[inline]
    pub(super) fn write_loc<B: Bus>(&mut self, bus: &mut B, loc: Loc8, value: u8) {
        match loc {
            Loc8::Reg(reg) => self.regs.set(reg, value),
            Loc8::Hl => bus.write8(self.regs.hl(), value),
        }
    }

    /// Resolve the address of an `(rr)` operand, applying the HL post
    /// increment/decrement of the `(HL+)`/`(HL-)` forms.
    pub(super) fn indirect_addr(&mut self, target: Indirect) -> u16 {
        match target {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    #[inline]
    pub(super) fn condition(&self, cond: Option<Cond>) -> bool {
        match cond {
            None => true,
            Some(Cond::NZ) => !self.regs.flag(Flag::Z),
            Some(Cond::Z) => self.regs.flag(Flag::Z),
            Some(Cond::NC) => !self.regs.flag(Flag::C),
            Some(Cond::C) => self.regs.flag(Flag::C),
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // HALT bug: the first opcode fetch after the bug does not
            // increment PC. We consume the bug here.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // Stack grows downward. High byte goes in first so that
        // memory[SP] = low and memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }
}
