/// Serial register a write landed on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerialPort {
    /// SB (0xFF01), the transfer data byte.
    Data,
    /// SC (0xFF02), the transfer control byte.
    Control,
}

impl SerialPort {
    pub const fn addr(self) -> u16 {
        match self {
            SerialPort::Data => 0xFF01,
            SerialPort::Control => 0xFF02,
        }
    }
}

/// Observer notified of every CPU write to SB or SC.
///
/// Any `FnMut(SerialPort, u8)` closure is a sink, so a host can simply
/// pass `|port, value| ...` to [`GameBoy::set_serial_sink`](crate::GameBoy::set_serial_sink).
pub trait SerialSink {
    fn serial_write(&mut self, port: SerialPort, value: u8);
}

impl<F> SerialSink for F
where
    F: FnMut(SerialPort, u8),
{
    fn serial_write(&mut self, port: SerialPort, value: u8) {
        self(port, value)
    }
}

/// Very small serial interface modelled via SB/SC.
///
/// There is no link partner: we only care about software writing bytes
/// over the serial port. When a transfer is started on SC (bit 7 set while
/// bit 0 is 1) and capture is on, the current SB value is appended to
/// `output` and the transfer start bit is cleared.
#[derive(Default)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    pub(crate) sc: u8,
    pub(crate) output: Vec<u8>,
    pub(crate) capture: bool,
    sink: Option<Box<dyn SerialSink>>,
}

impl Serial {
    pub(crate) fn set_sink(&mut self, sink: Option<Box<dyn SerialSink>>) {
        self.sink = sink;
    }

    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
        self.notify(SerialPort::Data, value);
    }

    pub(super) fn write_sc(&mut self, value: u8) {
        self.sc = value;
        self.notify(SerialPort::Control, value);

        // Internal clock & start bit set?
        if self.capture && (self.sc & 0x81) == 0x81 {
            self.output.push(self.sb);
            // Clear transfer start bit.
            self.sc &= !0x80;
        }
    }

    fn notify(&mut self, port: SerialPort, value: u8) {
        if let Some(sink) = self.sink.as_mut() {
            sink.serial_write(port, value);
        }
    }
}
