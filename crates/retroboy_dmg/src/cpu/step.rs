use super::{Bus, Cpu, Interrupt};

/// Machine cycles spent dispatching an interrupt (two idle cycles, two
/// stack writes, one jump).
pub const INTERRUPT_MCYCLES: u32 = 5;

impl Cpu {
    /// Execute a single instruction (or interrupt dispatch) and return the
    /// number of machine cycles it took.
    ///
    /// The opcode fetch advances the bus by one machine cycle before the
    /// interrupt controller is consulted; the rest of the instruction's cost
    /// is charged once it has executed, so peripherals never fall behind the
    /// CPU by more than one instruction.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.locked {
            // CPU has executed an invalid opcode under the `Lock` policy.
            // On hardware the CPU is effectively dead until power-off.
            return 0;
        }

        if self.stopped {
            // STOP freezes the system counter, so the bus is not advanced.
            // Only a joypad request ends it.
            let iflags = Interrupt::from_bits_truncate(bus.read8(Interrupt::IF_ADDR));
            if !iflags.contains(Interrupt::JOYPAD) {
                return 1;
            }
            log::debug!("GB CPU leaving STOP at PC=0x{:04X}", self.regs.pc);
            self.stopped = false;
        }

        if self.halted {
            if self.interrupts.pending(bus).is_empty() {
                bus.advance(1);
                return 1;
            }
            // Any pending interrupt wakes the CPU, even with IME clear; it is
            // only serviced below if IME is set.
            log::debug!("GB CPU leaving HALT at PC=0x{:04X}", self.regs.pc);
            self.halted = false;
        }

        let opcode_pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        bus.advance(1);

        if let Some(vector) = self.interrupts.service_if_pending(bus) {
            // The fetched opcode is discarded; it runs after RETI instead.
            return self.dispatch_interrupt(bus, opcode_pc, vector);
        }

        log::trace!("GB CPU PC=0x{opcode_pc:04X} opcode=0x{opcode:02X}");
        let cycles = self.exec_opcode(bus, opcode);
        bus.advance(cycles.saturating_sub(1));

        assert!(
            self.regs.f & 0x0F == 0,
            "F low nibble corrupted (F=0x{:02X}) by opcode 0x{opcode:02X} at PC=0x{opcode_pc:04X}",
            self.regs.f,
        );

        self.interrupts.apply_ime_delay();
        cycles
    }

    fn dispatch_interrupt<B: Bus>(&mut self, bus: &mut B, return_pc: u16, vector: u16) -> u32 {
        log::debug!(
            "GB CPU interrupt: vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            vector,
            return_pc,
            self.regs.sp,
        );
        self.push_u16(bus, return_pc);
        self.regs.pc = vector;
        // The opcode fetch already accounted for the first cycle.
        bus.advance(INTERRUPT_MCYCLES - 1);
        INTERRUPT_MCYCLES
    }
}
