use crate::config::UnknownOpcodePolicy;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        // STOP is officially a 2-byte instruction; the second byte is
        // often 0 and ignored. We always fetch and discard the padding
        // byte so that PC matches hardware.
        let _padding = self.fetch8(bus);

        log::debug!("GB CPU STOP at PC=0x{:04X}", self.regs.pc.wrapping_sub(2));
        self.stopped = true;
        self.halted = false;
    }

    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) {
        if !self.interrupts.ime() && !self.interrupts.pending(bus).is_empty() {
            if self.interrupts.enable_scheduled() {
                // EI ; HALT: IME comes on as HALT completes, so the pending
                // interrupt is taken at once and returns to the HALT itself.
                self.regs.pc = self.regs.pc.wrapping_sub(1);
                log::debug!("GB CPU HALT after EI at PC=0x{:04X}", self.regs.pc);
                return;
            }
            // HALT bug: with IME clear and an interrupt already pending the
            // CPU does not halt, and the next opcode fetch does not
            // increment PC.
            log::debug!("GB CPU HALT bug at PC=0x{:04X}", self.regs.pc.wrapping_sub(1));
            self.halt_bug = true;
            return;
        }

        log::debug!("GB CPU HALT at PC=0x{:04X}", self.regs.pc.wrapping_sub(1));
        self.halted = true;
    }

    pub(super) fn exec_di(&mut self) {
        self.interrupts.disable();
    }

    pub(super) fn exec_ei(&mut self) {
        // IME becomes 1 after the *next* instruction completes.
        self.interrupts.enable();
    }

    /// One of the unused opcodes (see Pandocs "CPU opcode holes").
    pub(super) fn exec_unknown(&mut self, opcode: u8) -> u32 {
        let opcode_addr = self.regs.pc.wrapping_sub(1);
        match self.unknown_opcode {
            UnknownOpcodePolicy::Skip => {
                log::warn!(
                    "GB CPU: unknown opcode 0x{opcode:02X} at PC=0x{opcode_addr:04X}, executing as NOP"
                );
            }
            UnknownOpcodePolicy::Lock => {
                log::error!(
                    "GB CPU locked: invalid opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                    pc = opcode_addr,
                    sp = self.regs.sp,
                    af = self.regs.af(),
                    bc = self.regs.bc(),
                    de = self.regs.de(),
                    hl = self.regs.hl(),
                );
                self.locked = true;
            }
        }
        // The fetch cycle has already been spent either way.
        1
    }
}
