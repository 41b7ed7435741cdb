pub mod config;
pub mod cpu;
pub mod machine;

pub use config::{CoreConfig, UnknownOpcodePolicy};
pub use cpu::{Bus, Cpu, Flag, Interrupt, Registers};
pub use machine::{GameBoy, SerialPort, SerialSink};

/// Number of T-cycles (clock cycles) in one CPU machine cycle.
pub const TCYCLES_PER_MCYCLE: u32 = 4;
