use crate::cpu::decode::Cond;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// JP a16 / JP cc,a16. The operand is always consumed; returns whether
    /// the jump was taken.
    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let addr = self.fetch16(bus);
        let taken = self.condition(cond);
        if taken {
            self.regs.pc = addr;
        }
        taken
    }

    /// JR e / JR cc,e.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let offset = self.fetch8(bus) as i8;
        let taken = self.condition(cond);
        if taken {
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
        }
        taken
    }
}
