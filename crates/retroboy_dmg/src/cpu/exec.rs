mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::decode::{self, Op, Opcode};
use super::{Bus, Cpu};

impl Cpu {
    /// Decode and execute a single base-page opcode and return its cost in
    /// machine cycles (including the opcode fetch).
    ///
    /// The opcode byte has already been fetched and PC advanced past it.
    pub(super) fn exec_opcode<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let entry = *decode::base(opcode);

        match entry.op {
            Op::Nop => {}
            Op::Stop => self.exec_stop(bus),
            Op::Halt => self.exec_halt(bus),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            Op::Ld { dst, src } => self.exec_ld(bus, dst, src),
            Op::LdImm(dst) => self.exec_ld_imm(bus, dst),
            Op::LdIndirectA(target) => self.exec_ld_indirect_a(bus, target),
            Op::LdAIndirect(target) => self.exec_ld_a_indirect(bus, target),
            Op::LdhImmA => self.exec_ldh_imm_a(bus),
            Op::LdhAImm => self.exec_ldh_a_imm(bus),
            Op::LdhCA => self.exec_ldh_c_a(bus),
            Op::LdhAC => self.exec_ldh_a_c(bus),
            Op::LdAbsA => self.exec_ld_abs_a(bus),
            Op::LdAAbs => self.exec_ld_a_abs(bus),

            Op::Ld16Imm(reg) => self.exec_ld16_imm(bus, reg),
            Op::LdAbsSp => self.exec_ld_abs_sp(bus),
            Op::LdSpHl => self.exec_ld_sp_hl(),
            Op::LdHlSpOffset => self.exec_ld_hl_sp_offset(bus),
            Op::Push(reg) => self.exec_push(bus, reg),
            Op::Pop(reg) => self.exec_pop(bus, reg),

            Op::Alu { op, src } => {
                let value = self.read_loc(bus, src);
                self.alu(op, value);
            }
            Op::AluImm(op) => {
                let value = self.fetch8(bus);
                self.alu(op, value);
            }
            Op::Inc8(loc) => self.exec_inc8(bus, loc),
            Op::Dec8(loc) => self.exec_dec8(bus, loc),
            Op::Daa => self.alu_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Inc16(reg) => self.exec_inc16(reg),
            Op::Dec16(reg) => self.exec_dec16(reg),
            Op::AddHl(reg) => {
                let value = self.regs.get16(reg);
                self.alu_add16_hl(value);
            }
            Op::AddSpOffset => self.exec_add_sp_offset(bus),

            Op::Rlca | Op::Rrca | Op::Rla | Op::Rra => self.exec_rotate_a(entry.op),

            Op::Jp(cond) => {
                let taken = self.exec_jp(bus, cond);
                return branch_cost(&entry, taken);
            }
            Op::JpHl => self.regs.pc = self.regs.hl(),
            Op::Jr(cond) => {
                let taken = self.exec_jr(bus, cond);
                return branch_cost(&entry, taken);
            }
            Op::Call(cond) => {
                let taken = self.exec_call(bus, cond);
                return branch_cost(&entry, taken);
            }
            Op::Ret(cond) => {
                let taken = self.exec_ret(bus, cond);
                return branch_cost(&entry, taken);
            }
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),

            Op::PrefixCb => return self.exec_cb(bus),
            Op::Unknown => return self.exec_unknown(opcode),
        }

        entry.cycles as u32
    }
}

#[inline]
fn branch_cost(entry: &Opcode, taken: bool) -> u32 {
    if taken {
        entry.taken_cycles as u32
    } else {
        entry.cycles as u32
    }
}
