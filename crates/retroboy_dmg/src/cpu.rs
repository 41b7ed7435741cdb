mod alu;
mod cb;
pub mod decode;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use interrupts::{Interrupt, Interrupts};
pub use regs::{Flag, Loc8, Reg16, Reg8, Registers};

use crate::config::UnknownOpcodePolicy;

/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU only ever talks to memory through this trait, so unit tests can
/// drive it with a flat array while the machine plugs in `GameBoyBus` with
/// its timer and interrupt registers.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read: low byte at `addr`, high byte at `addr+1`.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// Advance bus-side peripherals by `mcycles` machine cycles.
    ///
    /// Default implementation does nothing; the system bus overrides this to
    /// drive the timer and fold its interrupt requests into IF.
    fn advance(&mut self, _mcycles: u32) {}
}

/// Game Boy CPU core (SM83 / LR35902).
///
/// Owns the register file and interrupt state; memory is borrowed per step
/// through a [`Bus`].
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub interrupts: Interrupts,
    pub halted: bool,
    /// STOP low-power state. The timer is frozen and the CPU idles until a
    /// joypad interrupt request shows up in IF.
    stopped: bool,
    /// Set when HALT was executed with IME clear and an interrupt already
    /// pending: the next opcode fetch does not increment PC.
    halt_bug: bool,
    /// The CPU decoded an unused opcode under `UnknownOpcodePolicy::Lock`.
    locked: bool,
    unknown_opcode: UnknownOpcodePolicy,
}

impl Cpu {
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn ime(&self) -> bool {
        self.interrupts.ime()
    }
}
