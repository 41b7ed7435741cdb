/// Registers for the Game Boy CPU (LR35902).
///
/// Register pairs are never stored: `bc()`, `de()`, `hl()` and `af()` are
/// composed from their halves on every call so the two views cannot drift
/// apart.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// One of the seven 8-bit registers that can be addressed by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// 8-bit operand location used by the `0x40..=0xBF` block and the CB page.
///
/// `Hl` is the byte at the address held in HL, so reading or writing it
/// needs the bus; everything else lives in the register file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Loc8 {
    Reg(Reg8),
    Hl,
}

impl Loc8 {
    /// Decode the standard 3-bit operand field:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    pub const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Loc8::Reg(Reg8::B),
            1 => Loc8::Reg(Reg8::C),
            2 => Loc8::Reg(Reg8::D),
            3 => Loc8::Reg(Reg8::E),
            4 => Loc8::Reg(Reg8::H),
            5 => Loc8::Reg(Reg8::L),
            6 => Loc8::Hl,
            _ => Loc8::Reg(Reg8::A),
        }
    }

    #[inline]
    pub const fn is_memory(self) -> bool {
        matches!(self, Loc8::Hl)
    }
}

/// 16-bit register pairs plus SP.
///
/// `AF` only appears in PUSH/POP; `SP` only in the non-stack 16-bit forms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
    AF,
}

impl Registers {
    /// Register values the DMG boot ROM leaves behind when it hands control
    /// to the cartridge at 0x0100 (Pan Docs, "Power Up Sequence").
    pub const fn dmg_post_boot() -> Self {
        Self {
            a: 0x01,
            f: 0xB0, // Z=1 N=0 H=1 C=1
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        }
    }

    #[inline]
    pub fn get(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
        }
    }

    #[inline]
    pub fn set(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.a = value,
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.h = value,
            Reg8::L => self.l = value,
        }
    }

    #[inline]
    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
            Reg16::AF => self.af(),
        }
    }

    #[inline]
    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
            Reg16::AF => self.set_af(value),
        }
    }

    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        (self.f & flag.mask()) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        // Clear, then OR the bit back in; the low nibble is never touched.
        self.f &= !flag.mask();
        if value {
            self.f |= flag.mask();
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.f = 0;
    }
}
