/// Timer / divider unit.
///
/// DIV and TIMA are driven by two free-running accumulators fed with
/// T-cycles from the bus: DIV counts up once every 256 T-cycles and TIMA
/// once every `period` T-cycles, where the period is picked by TAC[1:0].
/// The DIV/TIMA/TMA/TAC helpers in `io` implement the register semantics
/// without advancing time themselves.
mod io;

/// T-cycles per DIV increment (16384 Hz).
const DIV_PERIOD: u32 = 256;

/// T-cycles per TIMA increment for each TAC clock select value:
/// - 00 → 4096 Hz
/// - 01 → 262144 Hz
/// - 10 → 65536 Hz
/// - 11 → 16384 Hz
const TIMA_PERIODS: [u32; 4] = [1024, 16, 64, 256];

pub(super) struct Timer {
    /// DIV (FF04).
    pub(super) div: u8,
    /// TIMA (FF05).
    pub(super) tima: u8,
    /// TMA (FF06).
    pub(super) tma: u8,
    /// TAC raw value (lower 3 bits meaningful).
    pub(super) tac: u8,
    /// Cached "timer enabled" flag derived from TAC bit 2.
    pub(super) enabled: bool,
    /// Cached TIMA period in T-cycles, derived from TAC[1:0].
    pub(super) period: u32,
    /// T-cycles accumulated towards the next DIV increment.
    div_counter: u32,
    /// T-cycles accumulated towards the next TIMA increment.
    tima_counter: u32,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            div: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            enabled: false,
            period: TIMA_PERIODS[0],
            div_counter: 0,
            tima_counter: 0,
        }
    }

    /// Initialise timer to the DMG state at PC=0x0100.
    ///
    /// DIV reads back as 0xAB as described in Pandocs; the counter itself
    /// is stopped (TAC=0).
    pub(super) fn init_dmg(&mut self) {
        *self = Self::new();
        self.div = 0xAB;
    }

    /// Advance the timer by `tcycles` T-cycles.
    ///
    /// A TIMA overflow reloads TMA and requests INT $50 by setting bit 2 of
    /// `if_reg` before this call returns.
    pub(super) fn tick(&mut self, tcycles: u32, if_reg: &mut u8) {
        self.div_counter += tcycles;
        while self.div_counter >= DIV_PERIOD {
            self.div_counter -= DIV_PERIOD;
            self.div = self.div.wrapping_add(1);
        }

        if !self.enabled {
            return;
        }

        self.tima_counter += tcycles;
        while self.tima_counter >= self.period {
            self.tima_counter -= self.period;
            self.increment_tima(if_reg);
        }
    }

    #[inline]
    fn increment_tima(&mut self, if_reg: &mut u8) {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            self.tima = self.tma;
            *if_reg |= 0x04;
            log::trace!("GB timer overflow: TIMA reloaded with 0x{:02X}", self.tma);
        } else {
            self.tima = next;
        }
    }
}
