use super::Interrupts;

impl Interrupts {
    /// Apply delayed IME change requested by EI. Called once after every
    /// executed instruction.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.enable_delay {
            // Instruction after EI has completed: actually enable IME.
            self.ime = true;
            self.enable_delay = false;
        } else if self.enable_pending {
            // EI itself just completed: arm the delayed enable.
            self.enable_pending = false;
            self.enable_delay = true;
        }
    }
}
