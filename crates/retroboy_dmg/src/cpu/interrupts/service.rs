use super::super::Bus;
use super::{Interrupt, Interrupts};

impl Interrupts {
    /// Sources that are both requested (IF) and enabled (IE), regardless of
    /// IME.
    pub fn pending<B: Bus>(&self, bus: &mut B) -> Interrupt {
        let ie = bus.read8(Interrupt::IE_ADDR);
        let iflags = bus.read8(Interrupt::IF_ADDR);
        Interrupt::from_bits_truncate(ie & iflags)
    }

    /// Accept the highest-priority pending interrupt, if IME allows it.
    ///
    /// On acceptance the IF bit is cleared, IME is cleared, and the service
    /// vector is returned. Pushing PC and jumping is the CPU's job.
    pub fn service_if_pending<B: Bus>(&mut self, bus: &mut B) -> Option<u16> {
        if !self.ime {
            return None;
        }

        let irq = self.pending(bus).highest_priority()?;
        let iflags = bus.read8(Interrupt::IF_ADDR);
        bus.write8(Interrupt::IF_ADDR, iflags & !irq.bits());

        self.ime = false;
        self.enable_pending = false;
        self.enable_delay = false;

        irq.vector()
    }
}
