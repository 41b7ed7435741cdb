use crate::cpu::decode::{Op, ShiftOp};
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// RLCA/RRCA/RLA/RRA: the CB rotates applied to A, except that Z is
    /// always cleared.
    pub(super) fn exec_rotate_a(&mut self, op: Op) {
        let shift = match op {
            Op::Rlca => ShiftOp::Rlc,
            Op::Rrca => ShiftOp::Rrc,
            Op::Rla => ShiftOp::Rl,
            Op::Rra => ShiftOp::Rr,
            _ => unreachable!("exec_rotate_a called with {op:?}"),
        };
        self.regs.a = self.alu_shift(shift, self.regs.a);
        self.regs.set_flag(Flag::Z, false);
    }

    /// ADD SP,e
    pub(super) fn exec_add_sp_offset<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flag::H, true);
        self.regs.set_flag(Flag::N, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.regs.set_flag(Flag::C, true);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::N, false);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.regs.flag(Flag::C);
        self.regs.set_flag(Flag::C, !carry);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::N, false);
    }
}
