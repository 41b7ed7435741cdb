use crate::cpu::{Bus, Cpu, Loc8, Reg16};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, loc: Loc8) {
        let value = self.read_loc(bus, loc);
        let result = self.alu_inc8(value);
        self.write_loc(bus, loc, result);
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, loc: Loc8) {
        let value = self.read_loc(bus, loc);
        let result = self.alu_dec8(value);
        self.write_loc(bus, loc, result);
    }

    /// INC rr. No flags; both halves come from the incremented value.
    pub(super) fn exec_inc16(&mut self, reg: Reg16) {
        let value = self.regs.get16(reg).wrapping_add(1);
        self.regs.set16(reg, value);
    }

    /// DEC rr. No flags.
    pub(super) fn exec_dec16(&mut self, reg: Reg16) {
        let value = self.regs.get16(reg).wrapping_sub(1);
        self.regs.set16(reg, value);
    }
}
