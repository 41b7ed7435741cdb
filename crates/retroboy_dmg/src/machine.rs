mod bus;
mod gameboy;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use gameboy::GameBoy;
pub use serial::{SerialPort, SerialSink};

/// Total addressable memory for the Game Boy (64 KiB).
///
/// The bus keeps a flat array and layers the memory map (ROM write
/// protection, echo RAM, IO registers) on top of it.
const MEMORY_SIZE: usize = 0x10000;

#[cfg(test)]
mod tests;
