//! Opcode descriptor tables.
//!
//! Both the base page and the CB page are decoded once into flat 256-entry
//! tables. Each entry names the operation, its operands and its cost in
//! machine cycles, so the executor never has to re-derive operand fields
//! from opcode bits.

use lazy_static::lazy_static;

use super::regs::{Loc8, Reg16};

/// Branch condition encoded in bits 4..3 of conditional opcodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }
}

/// Memory operand of the `LD (rr),A` / `LD A,(rr)` family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Indirect {
    BC,
    DE,
    /// (HL), then HL += 1.
    HlInc,
    /// (HL), then HL -= 1.
    HlDec,
}

/// Eight-way ALU selector shared by `0x80..=0xBF` and the immediate forms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// Rotate/shift selector of the CB page (`0x00..=0x3F`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

/// Base-page operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,

    // 8-bit loads.
    Ld { dst: Loc8, src: Loc8 },
    LdImm(Loc8),
    LdIndirectA(Indirect),
    LdAIndirect(Indirect),
    LdhImmA,
    LdhAImm,
    LdhCA,
    LdhAC,
    LdAbsA,
    LdAAbs,

    // 16-bit loads.
    Ld16Imm(Reg16),
    LdAbsSp,
    LdSpHl,
    LdHlSpOffset,
    Push(Reg16),
    Pop(Reg16),

    // 8-bit arithmetic / logic.
    Alu { op: AluOp, src: Loc8 },
    AluImm(AluOp),
    Inc8(Loc8),
    Dec8(Loc8),
    Daa,
    Cpl,
    Scf,
    Ccf,

    // 16-bit arithmetic.
    Inc16(Reg16),
    Dec16(Reg16),
    AddHl(Reg16),
    AddSpOffset,

    // Accumulator rotates.
    Rlca,
    Rrca,
    Rla,
    Rra,

    // Control flow.
    Jp(Option<Cond>),
    JpHl,
    Jr(Option<Cond>),
    Call(Option<Cond>),
    Ret(Option<Cond>),
    Reti,
    Rst(u16),
    PrefixCb,

    /// One of the eleven unused opcodes.
    Unknown,
}

/// Decoded base-page entry.
///
/// `cycles` is the cost in machine cycles, including the opcode fetch. For
/// conditional branches it is the not-taken cost and `taken_cycles` the
/// cost when the branch is taken; for everything else the two are equal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Opcode {
    pub op: Op,
    pub cycles: u8,
    pub taken_cycles: u8,
}

impl Opcode {
    const fn fixed(op: Op, cycles: u8) -> Self {
        Self {
            op,
            cycles,
            taken_cycles: cycles,
        }
    }

    const fn branch(op: Op, cycles: u8, taken_cycles: u8) -> Self {
        Self {
            op,
            cycles,
            taken_cycles,
        }
    }
}

/// CB-page operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CbOp {
    Shift(ShiftOp),
    Bit(u8),
    Res(u8),
    Set(u8),
}

/// Decoded CB-page entry. `cycles` includes both the 0xCB prefix and the
/// second opcode byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CbOpcode {
    pub op: CbOp,
    pub target: Loc8,
    pub cycles: u8,
}

lazy_static! {
    static ref BASE_TABLE: [Opcode; 256] = build_table(decode_base);
    static ref CB_TABLE: [CbOpcode; 256] = build_table(decode_cb);
}

fn build_table<T: Copy>(decode: fn(u8) -> T) -> [T; 256] {
    let mut table = [decode(0); 256];
    for (opcode, entry) in table.iter_mut().enumerate() {
        *entry = decode(opcode as u8);
    }
    table
}

/// Look up a base-page opcode.
#[inline]
pub fn base(opcode: u8) -> &'static Opcode {
    &BASE_TABLE[opcode as usize]
}

/// Look up the second byte of a CB-prefixed instruction.
#[inline]
pub fn cb(opcode: u8) -> &'static CbOpcode {
    &CB_TABLE[opcode as usize]
}

/// `rp` column of the 16-bit load/arithmetic opcodes (bits 5..4).
const fn rp(opcode: u8) -> Reg16 {
    match (opcode >> 4) & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::SP,
    }
}

/// `rp2` column used by PUSH/POP, where SP is replaced by AF.
const fn rp2(opcode: u8) -> Reg16 {
    match (opcode >> 4) & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::AF,
    }
}

fn decode_base(opcode: u8) -> Opcode {
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;

    match opcode {
        0x00 => Opcode::fixed(Op::Nop, 1),
        0x10 => Opcode::fixed(Op::Stop, 1),
        0x76 => Opcode::fixed(Op::Halt, 1),
        0xF3 => Opcode::fixed(Op::Di, 1),
        0xFB => Opcode::fixed(Op::Ei, 1),

        // LD rr, d16
        0x01 | 0x11 | 0x21 | 0x31 => Opcode::fixed(Op::Ld16Imm(rp(opcode)), 3),

        // LD (BC/DE/HL±), A and LD A, (BC/DE/HL±)
        0x02 | 0x12 | 0x22 | 0x32 => Opcode::fixed(Op::LdIndirectA(indirect(opcode)), 2),
        0x0A | 0x1A | 0x2A | 0x3A => Opcode::fixed(Op::LdAIndirect(indirect(opcode)), 2),

        // INC rr / DEC rr / ADD HL, rr
        0x03 | 0x13 | 0x23 | 0x33 => Opcode::fixed(Op::Inc16(rp(opcode)), 2),
        0x0B | 0x1B | 0x2B | 0x3B => Opcode::fixed(Op::Dec16(rp(opcode)), 2),
        0x09 | 0x19 | 0x29 | 0x39 => Opcode::fixed(Op::AddHl(rp(opcode)), 2),

        // INC r / DEC r / LD r, d8
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            let loc = Loc8::from_index(y);
            Opcode::fixed(Op::Inc8(loc), if loc.is_memory() { 3 } else { 1 })
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            let loc = Loc8::from_index(y);
            Opcode::fixed(Op::Dec8(loc), if loc.is_memory() { 3 } else { 1 })
        }
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            let loc = Loc8::from_index(y);
            Opcode::fixed(Op::LdImm(loc), if loc.is_memory() { 3 } else { 2 })
        }

        0x07 => Opcode::fixed(Op::Rlca, 1),
        0x0F => Opcode::fixed(Op::Rrca, 1),
        0x17 => Opcode::fixed(Op::Rla, 1),
        0x1F => Opcode::fixed(Op::Rra, 1),

        0x08 => Opcode::fixed(Op::LdAbsSp, 5),

        0x18 => Opcode::fixed(Op::Jr(None), 3),
        0x20 | 0x28 | 0x30 | 0x38 => Opcode::branch(Op::Jr(Some(Cond::from_index(y))), 2, 3),

        0x27 => Opcode::fixed(Op::Daa, 1),
        0x2F => Opcode::fixed(Op::Cpl, 1),
        0x37 => Opcode::fixed(Op::Scf, 1),
        0x3F => Opcode::fixed(Op::Ccf, 1),

        // LD r, r' (0x76 is HALT, matched above)
        0x40..=0x7F => {
            let dst = Loc8::from_index(y);
            let src = Loc8::from_index(z);
            let cycles = if dst.is_memory() || src.is_memory() { 2 } else { 1 };
            Opcode::fixed(Op::Ld { dst, src }, cycles)
        }

        // ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, r
        0x80..=0xBF => {
            let src = Loc8::from_index(z);
            let cycles = if src.is_memory() { 2 } else { 1 };
            Opcode::fixed(
                Op::Alu {
                    op: AluOp::from_index(y),
                    src,
                },
                cycles,
            )
        }

        // ALU A, d8
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
            Opcode::fixed(Op::AluImm(AluOp::from_index(y)), 2)
        }

        0xC0 | 0xC8 | 0xD0 | 0xD8 => Opcode::branch(Op::Ret(Some(Cond::from_index(y))), 2, 5),
        0xC9 => Opcode::fixed(Op::Ret(None), 4),
        0xD9 => Opcode::fixed(Op::Reti, 4),

        0xC1 | 0xD1 | 0xE1 | 0xF1 => Opcode::fixed(Op::Pop(rp2(opcode)), 3),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => Opcode::fixed(Op::Push(rp2(opcode)), 4),

        0xC2 | 0xCA | 0xD2 | 0xDA => Opcode::branch(Op::Jp(Some(Cond::from_index(y))), 3, 4),
        0xC3 => Opcode::fixed(Op::Jp(None), 4),
        0xE9 => Opcode::fixed(Op::JpHl, 1),

        0xC4 | 0xCC | 0xD4 | 0xDC => Opcode::branch(Op::Call(Some(Cond::from_index(y))), 3, 6),
        0xCD => Opcode::fixed(Op::Call(None), 6),

        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            Opcode::fixed(Op::Rst((opcode & 0x38) as u16), 4)
        }

        // Cost of the whole instruction comes from the CB table.
        0xCB => Opcode::fixed(Op::PrefixCb, 1),

        0xE0 => Opcode::fixed(Op::LdhImmA, 3),
        0xF0 => Opcode::fixed(Op::LdhAImm, 3),
        0xE2 => Opcode::fixed(Op::LdhCA, 2),
        0xF2 => Opcode::fixed(Op::LdhAC, 2),
        0xEA => Opcode::fixed(Op::LdAbsA, 4),
        0xFA => Opcode::fixed(Op::LdAAbs, 4),

        0xE8 => Opcode::fixed(Op::AddSpOffset, 4),
        0xF8 => Opcode::fixed(Op::LdHlSpOffset, 3),
        0xF9 => Opcode::fixed(Op::LdSpHl, 2),

        // D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD
        _ => Opcode::fixed(Op::Unknown, 1),
    }
}

const fn indirect(opcode: u8) -> Indirect {
    match (opcode >> 4) & 0x03 {
        0 => Indirect::BC,
        1 => Indirect::DE,
        2 => Indirect::HlInc,
        _ => Indirect::HlDec,
    }
}

fn decode_cb(opcode: u8) -> CbOpcode {
    let y = (opcode >> 3) & 0x07;
    let target = Loc8::from_index(opcode);
    let memory = target.is_memory();

    let (op, cycles) = match opcode >> 6 {
        0 => (CbOp::Shift(ShiftOp::from_index(y)), if memory { 4 } else { 2 }),
        // BIT only reads (HL), so it is one cycle cheaper than RES/SET.
        1 => (CbOp::Bit(y), if memory { 3 } else { 2 }),
        2 => (CbOp::Res(y), if memory { 4 } else { 2 }),
        _ => (CbOp::Set(y), if memory { 4 } else { 2 }),
    };

    CbOpcode { op, target, cycles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::regs::Reg8;

    const UNUSED: [u8; 11] = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];

    #[test]
    fn only_the_documented_holes_decode_as_unknown() {
        for opcode in 0..=255u8 {
            let unknown = base(opcode).op == Op::Unknown;
            assert_eq!(unknown, UNUSED.contains(&opcode), "opcode {opcode:#04x}");
        }
    }

    #[test]
    fn conditional_entries_have_distinct_taken_cost() {
        for opcode in 0..=255u8 {
            let entry = base(opcode);
            let conditional = matches!(
                entry.op,
                Op::Jp(Some(_)) | Op::Jr(Some(_)) | Op::Call(Some(_)) | Op::Ret(Some(_))
            );
            assert_eq!(
                conditional,
                entry.taken_cycles != entry.cycles,
                "opcode {opcode:#04x}"
            );
        }
    }

    #[test]
    fn selected_costs_match_dmg_table() {
        let cases: &[(u8, u8)] = &[
            (0x00, 1),
            (0x01, 3),
            (0x08, 5),
            (0x34, 3),
            (0x36, 3),
            (0x46, 2),
            (0x70, 2),
            (0x41, 1),
            (0x86, 2),
            (0xC3, 4),
            (0xC5, 4),
            (0xC1, 3),
            (0xCD, 6),
            (0xE8, 4),
            (0xF8, 3),
            (0xF9, 2),
            (0xE9, 1),
            (0xFF, 4),
        ];
        for &(opcode, cycles) in cases {
            assert_eq!(base(opcode).cycles, cycles, "opcode {opcode:#04x}");
        }
    }

    #[test]
    fn ld_block_decodes_dst_and_src() {
        assert_eq!(
            base(0x78).op,
            Op::Ld {
                dst: Loc8::Reg(Reg8::A),
                src: Loc8::Reg(Reg8::B)
            }
        );
        assert_eq!(
            base(0x70).op,
            Op::Ld {
                dst: Loc8::Hl,
                src: Loc8::Reg(Reg8::B)
            }
        );
        assert_eq!(base(0x76).op, Op::Halt);
    }

    #[test]
    fn cb_table_covers_every_byte() {
        assert_eq!(cb(0x00).op, CbOp::Shift(ShiftOp::Rlc));
        assert_eq!(cb(0x37).op, CbOp::Shift(ShiftOp::Swap));
        assert_eq!(cb(0x7E).op, CbOp::Bit(7));
        assert_eq!(cb(0x7E).target, Loc8::Hl);
        assert_eq!(cb(0x7E).cycles, 3);
        assert_eq!(cb(0x86).op, CbOp::Res(0));
        assert_eq!(cb(0x86).cycles, 4);
        assert_eq!(cb(0xFF).op, CbOp::Set(7));
        assert_eq!(cb(0xFF).target, Loc8::Reg(Reg8::A));
        assert_eq!(cb(0xFF).cycles, 2);
    }

    #[test]
    fn push_pop_use_af_not_sp() {
        assert_eq!(base(0xF5).op, Op::Push(Reg16::AF));
        assert_eq!(base(0xF1).op, Op::Pop(Reg16::AF));
        assert_eq!(base(0x31).op, Op::Ld16Imm(Reg16::SP));
        assert_eq!(base(0x39).op, Op::AddHl(Reg16::SP));
    }
}
