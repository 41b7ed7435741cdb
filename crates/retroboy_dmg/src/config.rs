use typed_builder::TypedBuilder;

/// What the CPU does when it decodes one of the unused opcodes
/// (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnknownOpcodePolicy {
    /// Log the opcode and treat it as a 1-cycle NOP so the program keeps
    /// advancing.
    #[default]
    Skip,
    /// Hard-lock the CPU like real hardware does. `step()` then returns 0
    /// until the machine is re-initialised.
    Lock,
}

/// Construction-time options for [`GameBoy`](crate::GameBoy).
///
/// ```
/// use retroboy_dmg::{CoreConfig, UnknownOpcodePolicy};
///
/// let config = CoreConfig::builder()
///     .unknown_opcode(UnknownOpcodePolicy::Lock)
///     .build();
/// assert!(config.capture_serial);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, TypedBuilder)]
pub struct CoreConfig {
    #[builder(default)]
    pub unknown_opcode: UnknownOpcodePolicy,
    /// Buffer bytes shifted out over the serial port (SC=0x81 transfer
    /// start). Test ROMs such as blargg's report their results this way.
    #[builder(default = true)]
    pub capture_serial: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
