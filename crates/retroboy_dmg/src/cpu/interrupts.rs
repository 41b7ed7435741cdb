mod ime;
mod service;

use bitflags::bitflags;

bitflags! {
    /// Interrupt request / enable bits as laid out in IF (0xFF0F) and
    /// IE (0xFFFF). Lower bits have higher priority.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Interrupt {
    /// Address of the interrupt enable register.
    pub const IE_ADDR: u16 = 0xFFFF;
    /// Address of the interrupt flag register.
    pub const IF_ADDR: u16 = 0xFF0F;

    /// Highest-priority (lowest-numbered) source in the set, if any.
    #[inline]
    pub fn highest_priority(self) -> Option<Interrupt> {
        if self.is_empty() {
            return None;
        }
        Some(Interrupt::from_bits_truncate(1 << self.bits().trailing_zeros()))
    }

    /// Service vector of the highest-priority source in the set:
    /// VBlank 0x40, LCD STAT 0x48, Timer 0x50, Serial 0x58, Joypad 0x60.
    #[inline]
    pub fn vector(self) -> Option<u16> {
        self.highest_priority()
            .map(|irq| 0x0040 + irq.bits().trailing_zeros() as u16 * 8)
    }
}

/// Interrupt controller state owned by the CPU.
///
/// IE and IF themselves live on the bus; this only tracks the master
/// enable and the one-instruction delay that EI applies to it.
#[derive(Clone, Debug, Default)]
pub struct Interrupts {
    ime: bool,
    /// EI executed during the current instruction.
    enable_pending: bool,
    /// EI executed during the previous instruction; IME turns on once the
    /// current one completes.
    enable_delay: bool,
}

impl Interrupts {
    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    /// EI ran on the previous instruction; IME turns on once the current
    /// one completes.
    #[inline]
    pub(in crate::cpu) fn enable_scheduled(&self) -> bool {
        self.enable_delay
    }

    /// EI: IME becomes set only after the instruction following EI has
    /// completed.
    pub fn enable(&mut self) {
        self.enable_pending = true;
    }

    /// RETI: IME is set immediately.
    pub fn enable_now(&mut self) {
        self.ime = true;
        self.enable_pending = false;
        self.enable_delay = false;
    }

    /// DI: IME is cleared immediately and any delayed EI is cancelled.
    pub fn disable(&mut self) {
        self.ime = false;
        self.enable_pending = false;
        self.enable_delay = false;
    }
}
