use super::decode::{self, CbOp};
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    ///
    /// The prefix byte has already been fetched; this fetches the second
    /// opcode byte and returns the cost of the whole two-byte instruction.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let entry = *decode::cb(self.fetch8(bus));
        let target = entry.target;

        match entry.op {
            CbOp::Shift(op) => {
                let value = self.read_loc(bus, target);
                let result = self.alu_shift(op, value);
                self.write_loc(bus, target, result);
            }
            CbOp::Bit(bit) => {
                let value = self.read_loc(bus, target);
                // Preserve C, set H=1, N=0.
                self.regs.set_flag(Flag::Z, value & (1 << bit) == 0);
                self.regs.set_flag(Flag::N, false);
                self.regs.set_flag(Flag::H, true);
            }
            CbOp::Res(bit) => {
                let value = self.read_loc(bus, target);
                self.write_loc(bus, target, value & !(1 << bit));
            }
            CbOp::Set(bit) => {
                let value = self.read_loc(bus, target);
                self.write_loc(bus, target, value | (1 << bit));
            }
        }

        entry.cycles as u32
    }
}
