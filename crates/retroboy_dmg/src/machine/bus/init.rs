use super::GameBoyBus;

impl GameBoyBus {
    /// Initialize I/O registers to match the DMG/MGB state at PC=0x0100.
    ///
    /// Called by `Default` and again on every ROM load. Memory is cleared;
    /// nothing here depends on the previous contents.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        self.memory.fill(0);

        // Joypad: no group selected.
        self.memory[0xFF00] = 0xCF;

        // Serial. The sink survives a reset; captured output does not.
        self.serial.sb = 0x00;
        self.serial.sc = 0x7E;
        self.serial.output.clear();

        // Divider / timer.
        self.timer.init_dmg();

        // IF's upper 3 bits always read as 1 on DMG; the hardware happens
        // to have bit 0 set at PC=0x0100 as well (VBlank request).
        self.if_reg = 0x01;
        self.ie_reg = 0x00;

        self.boot_latch = 0x00;
    }
}
