use crate::cpu::decode::Indirect;
use crate::cpu::{Bus, Cpu, Loc8, Reg16};

impl Cpu {
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: Loc8, src: Loc8) {
        let value = self.read_loc(bus, src);
        self.write_loc(bus, dst, value);
    }

    pub(super) fn exec_ld_imm<B: Bus>(&mut self, bus: &mut B, dst: Loc8) {
        let value = self.fetch8(bus);
        self.write_loc(bus, dst, value);
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, target: Indirect) {
        let addr = self.indirect_addr(target);
        bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, target: Indirect) {
        let addr = self.indirect_addr(target);
        self.regs.a = bus.read8(addr);
    }

    /// LDH (a8),A
    pub(super) fn exec_ldh_imm_a<B: Bus>(&mut self, bus: &mut B) {
        let addr = zero_page(self.fetch8(bus));
        bus.write8(addr, self.regs.a);
    }

    /// LDH A,(a8)
    pub(super) fn exec_ldh_a_imm<B: Bus>(&mut self, bus: &mut B) {
        let addr = zero_page(self.fetch8(bus));
        self.regs.a = bus.read8(addr);
    }

    /// LD (C),A
    pub(super) fn exec_ldh_c_a<B: Bus>(&mut self, bus: &mut B) {
        bus.write8(zero_page(self.regs.c), self.regs.a);
    }

    /// LD A,(C)
    pub(super) fn exec_ldh_a_c<B: Bus>(&mut self, bus: &mut B) {
        self.regs.a = bus.read8(zero_page(self.regs.c));
    }

    pub(super) fn exec_ld_abs_a<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ld_a_abs<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        self.regs.a = bus.read8(addr);
    }

    pub(super) fn exec_ld16_imm<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.fetch16(bus);
        self.regs.set16(reg, value);
    }

    /// LD (a16),SP
    pub(super) fn exec_ld_abs_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        bus.write16(addr, self.regs.sp);
    }

    pub(super) fn exec_ld_sp_hl(&mut self) {
        self.regs.sp = self.regs.hl();
    }

    /// LD HL,SP+e
    pub(super) fn exec_ld_hl_sp_offset<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
    }
}

#[inline]
fn zero_page(offset: u8) -> u16 {
    0xFF00 | offset as u16
}
