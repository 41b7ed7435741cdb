use crate::cpu::decode::Cond;
use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.regs.get16(reg);
        self.push_u16(bus, value);
    }

    /// POP rr. POP AF re-masks the low nibble of F through `set_af`.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.pop_u16(bus);
        self.regs.set16(reg, value);
    }

    /// CALL a16 / CALL cc,a16.
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let addr = self.fetch16(bus);
        let taken = self.condition(cond);
        if taken {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
        taken
    }

    /// RET / RET cc.
    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let taken = self.condition(cond);
        if taken {
            self.regs.pc = self.pop_u16(bus);
        }
        taken
    }

    /// RETI enables IME immediately, without the EI delay.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
        self.interrupts.enable_now();
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u16) {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = vector;
    }
}
