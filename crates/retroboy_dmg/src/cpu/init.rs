use crate::config::UnknownOpcodePolicy;

use super::{Cpu, Interrupts, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_policy(UnknownOpcodePolicy::default())
    }

    pub fn with_policy(unknown_opcode: UnknownOpcodePolicy) -> Self {
        Self {
            regs: Registers::dmg_post_boot(),
            // Per Pan Docs, IME is clear when control is handed to the
            // cartridge at 0x0100. The game (or test ROM) is responsible for
            // enabling interrupts via EI/RETI as needed.
            interrupts: Interrupts::default(),
            halted: false,
            stopped: false,
            halt_bug: false,
            locked: false,
            unknown_opcode,
        }
    }

    /// Reset the CPU to the DMG post-boot state, keeping the configured
    /// unknown-opcode policy.
    pub fn reset(&mut self) {
        *self = Self::with_policy(self.unknown_opcode);
    }
}
