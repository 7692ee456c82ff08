//! # ARM ALU Opcodes and Barrel Shifter
//!
//! Data processing instruction format:
//!
//! ```text
//! 31-28  27-26  25   24-21   20   19-16  15-12  11-0
//! [Cond] [ 00 ] [I] [OpCode] [S] [ Rn ] [ Rd ] [Operand2]
//! ```
//!
//! The second operand passes through the barrel shifter before reaching the
//! ALU: either a register shifted by an immediate 5-bit amount or by the low
//! byte of Rs, or an 8-bit immediate rotated right by twice a 4-bit field.
//!
//! Operations split into two families, which differ in how the carry flag is
//! produced when the S bit is set:
//! - **Logical** (AND, EOR, TST, TEQ, ORR, MOV, BIC, MVN): carry comes from
//!   the shifter.
//! - **Arithmetic** (SUB, RSB, ADD, ADC, SBC, RSC, CMP, CMN): carry comes
//!   from the operation itself.

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::flags::ShiftKind;

/// The 16 data processing operations, encoded in bits 24-21.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ArmAluOp {
    /// Logical AND: `Rd = Rn AND Op2`
    And = 0x0,
    /// Exclusive OR: `Rd = Rn XOR Op2`
    Eor = 0x1,
    /// Subtract: `Rd = Rn - Op2`
    Sub = 0x2,
    /// Reverse Subtract: `Rd = Op2 - Rn`
    Rsb = 0x3,
    /// Add: `Rd = Rn + Op2`
    Add = 0x4,
    /// Add with Carry: `Rd = Rn + Op2 + C`
    Adc = 0x5,
    /// Subtract with Carry: `Rd = Rn - Op2 - !C`
    Sbc = 0x6,
    /// Reverse Subtract with Carry: `Rd = Op2 - Rn - !C`
    Rsc = 0x7,
    /// Test bits (AND, flags only, no result written)
    Tst = 0x8,
    /// Test Equivalence (XOR, flags only, no result written)
    Teq = 0x9,
    /// Compare (SUB, flags only, no result written)
    Cmp = 0xA,
    /// Compare Negative (ADD, flags only, no result written)
    Cmn = 0xB,
    /// Logical OR: `Rd = Rn OR Op2`
    Orr = 0xC,
    /// Move: `Rd = Op2` (Rn is ignored)
    Mov = 0xD,
    /// Bit Clear: `Rd = Rn AND NOT Op2`
    Bic = 0xE,
    /// Move Not: `Rd = NOT Op2` (Rn is ignored)
    Mvn = 0xF,
}

impl From<u32> for ArmAluOp {
    fn from(opcode: u32) -> Self {
        match opcode {
            0x0 => Self::And,
            0x1 => Self::Eor,
            0x2 => Self::Sub,
            0x3 => Self::Rsb,
            0x4 => Self::Add,
            0x5 => Self::Adc,
            0x6 => Self::Sbc,
            0x7 => Self::Rsc,
            0x8 => Self::Tst,
            0x9 => Self::Teq,
            0xA => Self::Cmp,
            0xB => Self::Cmn,
            0xC => Self::Orr,
            0xD => Self::Mov,
            0xE => Self::Bic,
            0xF => Self::Mvn,
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for ArmAluOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Eor => f.write_str("EOR"),
            Self::Sub => f.write_str("SUB"),
            Self::Rsb => f.write_str("RSB"),
            Self::Add => f.write_str("ADD"),
            Self::Adc => f.write_str("ADC"),
            Self::Sbc => f.write_str("SBC"),
            Self::Rsc => f.write_str("RSC"),
            Self::Tst => f.write_str("TST"),
            Self::Teq => f.write_str("TEQ"),
            Self::Cmp => f.write_str("CMP"),
            Self::Cmn => f.write_str("CMN"),
            Self::Orr => f.write_str("ORR"),
            Self::Mov => f.write_str("MOV"),
            Self::Bic => f.write_str("BIC"),
            Self::Mvn => f.write_str("MVN"),
        }
    }
}

/// Classification of ALU instructions for flag handling.
#[derive(Eq, PartialEq, Debug)]
pub enum AluKind {
    /// Carry flag is set by the barrel shifter, not the ALU.
    Logical,
    /// Carry flag is set by the add/subtract operation itself.
    Arithmetic,
}

impl ArmAluOp {
    /// Whether this is a logical or arithmetic operation.
    #[must_use]
    pub fn kind(self) -> AluKind {
        match self {
            Self::And
            | Self::Eor
            | Self::Tst
            | Self::Teq
            | Self::Orr
            | Self::Mov
            | Self::Bic
            | Self::Mvn => AluKind::Logical,
            Self::Sub
            | Self::Rsb
            | Self::Add
            | Self::Adc
            | Self::Sbc
            | Self::Rsc
            | Self::Cmp
            | Self::Cmn => AluKind::Arithmetic,
        }
    }

    /// TST, TEQ, CMP and CMN set flags but never write Rd.
    #[must_use]
    pub fn is_test(self) -> bool {
        matches!(self, Self::Tst | Self::Teq | Self::Cmp | Self::Cmn)
    }
}

/// Result of an ALU or shift operation, including the flags to apply when
/// the S bit is set.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Default)]
pub struct ArithmeticOpResult {
    /// The computed value.
    pub result: u32,
    /// Carry flag (C): last bit shifted out, or unsigned overflow / no
    /// borrow for arithmetic.
    pub carry: bool,
    /// Overflow flag (V): signed arithmetic overflow.
    pub overflow: bool,
    /// Sign flag (N): bit 31 of the result.
    pub sign: bool,
    /// Zero flag (Z): result is exactly zero.
    pub zero: bool,
}

/// Performs a barrel shifter operation.
///
/// `overflow`, `sign` and `zero` in the returned result are not meaningful;
/// only `result` and `carry` are produced by the shifter.
///
/// # Special cases
///
/// - `LSL #0`: no shift, carry unchanged
/// - `LSR #0`: encodes `LSR #32`: result 0, carry = bit 31
/// - `ASR #0` (and any amount >= 32): result filled with bit 31, carry = bit 31
/// - `ROR #0`: encodes `RRX`, rotate right through carry by 1
///
/// A shift amount of 0 taken from a register is a no-op and must be handled
/// by the caller before reaching the shifter.
pub fn shift(kind: ShiftKind, shift_amount: u32, rm: u32, carry: bool) -> ArithmeticOpResult {
    match kind {
        ShiftKind::Lsl => match shift_amount {
            // LSL#0: no shift performed, the C flag is NOT affected.
            0 => ArithmeticOpResult {
                result: rm,
                carry,
                ..Default::default()
            },
            1..=31 => ArithmeticOpResult {
                result: rm << shift_amount,
                carry: rm.get_bit((32 - shift_amount) as u8),
                ..Default::default()
            },
            // LSL#32: result 0, carry = bit 0 of Rm.
            32 => ArithmeticOpResult {
                result: 0,
                carry: rm.get_bit(0),
                ..Default::default()
            },
            // LSL#33...: result 0, carry 0.
            _ => ArithmeticOpResult::default(),
        },
        ShiftKind::Lsr => match shift_amount {
            // LSR#0 encodes LSR#32: result 0, carry = bit 31 of Rm.
            0 | 32 => ArithmeticOpResult {
                result: 0,
                carry: rm.get_bit(31),
                ..Default::default()
            },
            1..=31 => ArithmeticOpResult {
                result: rm >> shift_amount,
                carry: rm.get_bit((shift_amount - 1) as u8),
                ..Default::default()
            },
            _ => ArithmeticOpResult::default(),
        },
        ShiftKind::Asr => match shift_amount {
            1..=31 => ArithmeticOpResult {
                result: ((rm as i32) >> shift_amount) as u32,
                carry: rm.get_bit((shift_amount - 1) as u8),
                ..Default::default()
            },
            // ASR#0 encodes ASR#32; that and anything above replicate the
            // sign bit through result and carry.
            _ => ArithmeticOpResult {
                result: ((rm as i32) >> 31) as u32,
                carry: rm.get_bit(31),
                ..Default::default()
            },
        },
        ShiftKind::Ror => {
            // ROR by n > 32 behaves as ROR by n-32, repeatedly; a multiple
            // of 32 behaves as ROR#32.
            let mut amount = shift_amount;
            if amount > 32 {
                amount %= 32;
                if amount == 0 {
                    amount = 32;
                }
            }

            match amount {
                // ROR#0 encodes RRX: C becomes bit 31, bit 0 becomes C.
                0 => ArithmeticOpResult {
                    result: (rm >> 1) | ((carry as u32) << 31),
                    carry: rm.get_bit(0),
                    ..Default::default()
                },
                1..=31 => ArithmeticOpResult {
                    result: rm.rotate_right(amount),
                    carry: rm.get_bit((amount - 1) as u8),
                    ..Default::default()
                },
                // ROR#32 leaves Rm unchanged, carry = bit 31.
                32 => ArithmeticOpResult {
                    result: rm,
                    carry: rm.get_bit(31),
                    ..Default::default()
                },
                _ => unreachable!(),
            }
        }
    }
}

/// Which Program Status Register a PSR transfer accesses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PsrKind {
    /// Current Program Status Register.
    Cpsr,
    /// Saved Program Status Register, banked per exception mode.
    Spsr,
}

impl From<bool> for PsrKind {
    fn from(value: bool) -> Self {
        if value {
            Self::Spsr
        } else {
            Self::Cpsr
        }
    }
}

impl std::fmt::Display for PsrKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpsr => f.write_str("CPSR"),
            Self::Spsr => f.write_str("SPSR"),
        }
    }
}

/// A PSR transfer operation.
///
/// The MSR field mask (bits 19-16) selects which quarters of the PSR are
/// written:
///
/// | Bit | Field | PSR Bits | Description          |
/// |-----|-------|----------|----------------------|
/// | 3   | f     | 31-24    | Condition flags      |
/// | 2   | s     | 23-16    | Status (reserved)    |
/// | 1   | x     | 15-8     | Extension (reserved) |
/// | 0   | c     | 7-0      | Control bits         |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PsrOpKind {
    /// MRS: transfer PSR contents to a register.
    Mrs { destination_register: u32 },
    /// MSR: transfer a register or rotated immediate to the PSR fields
    /// selected by the mask.
    Msr {
        operand: AluSecondOperand,
        field_mask: u32,
    },
}

/// How the shift amount of a register operand is specified.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ShiftOperator {
    /// Shift amount is an immediate 5-bit value (0-31, with the 0 special
    /// encodings).
    Immediate(u32),
    /// Shift amount comes from the bottom byte of a register.
    Register(u32),
}

impl std::fmt::Display for ShiftOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate(value) => write!(f, "#{value}"),
            Self::Register(register) => write!(f, "R{register}"),
        }
    }
}

/// The second operand of a data processing instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AluSecondOperand {
    /// Register operand with optional shift.
    Register {
        shift_op: ShiftOperator,
        shift_kind: ShiftKind,
        register: u32,
    },
    /// 8-bit immediate rotated right by an even amount.
    Immediate { base: u32, rotate: u32 },
}

impl std::fmt::Display for AluSecondOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Register {
                shift_op,
                shift_kind,
                register,
            } => {
                if let ShiftOperator::Immediate(0) = shift_op {
                    return match shift_kind {
                        ShiftKind::Lsl => write!(f, "R{register}"),
                        ShiftKind::Ror => write!(f, "R{register}, RRX"),
                        _ => write!(f, "R{register}, {shift_kind} #32"),
                    };
                }

                write!(f, "R{register}, {shift_kind} {shift_op}")
            }
            Self::Immediate { base, rotate } => {
                write!(f, "#0x{:X}", base.rotate_right(rotate))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn alu_kind_classification() {
        assert_eq!(ArmAluOp::Teq.kind(), AluKind::Logical);
        assert_eq!(ArmAluOp::Sub.kind(), AluKind::Arithmetic);
        assert!(ArmAluOp::Cmp.is_test());
        assert!(!ArmAluOp::Mov.is_test());
    }

    #[test]
    fn lsl_special_cases() {
        // LSL#0 keeps value and carry.
        let r = shift(ShiftKind::Lsl, 0, 0xFFFF_FFFF, true);
        assert_eq!(r.result, 0xFFFF_FFFF);
        assert!(r.carry);

        let r = shift(ShiftKind::Lsl, 4, 0xF000_0001, false);
        assert_eq!(r.result, 0x0000_0010);
        assert!(r.carry); // bit 28 shifted out last

        // LSL#32: result 0, carry = bit 0.
        let r = shift(ShiftKind::Lsl, 32, 0x0000_0001, false);
        assert_eq!(r.result, 0);
        assert!(r.carry);

        // LSL#33: result 0, carry 0.
        let r = shift(ShiftKind::Lsl, 33, 0xFFFF_FFFF, true);
        assert_eq!(r.result, 0);
        assert!(!r.carry);
    }

    #[test]
    fn lsr_special_cases() {
        // LSR#0 encodes LSR#32.
        let r = shift(ShiftKind::Lsr, 0, 0x8000_0000, false);
        assert_eq!(r.result, 0);
        assert!(r.carry);

        let r = shift(ShiftKind::Lsr, 4, 0x0000_0018, false);
        assert_eq!(r.result, 1);
        assert!(r.carry); // bit 3 shifted out last

        let r = shift(ShiftKind::Lsr, 33, 0xFFFF_FFFF, true);
        assert_eq!(r.result, 0);
        assert!(!r.carry);
    }

    #[test]
    fn asr_replicates_the_sign_bit() {
        let r = shift(ShiftKind::Asr, 4, 0x8000_0000, false);
        assert_eq!(r.result, 0xF800_0000);

        // ASR#0 encodes ASR#32.
        let r = shift(ShiftKind::Asr, 0, 0x8000_0000, false);
        assert_eq!(r.result, 0xFFFF_FFFF);
        assert!(r.carry);

        let r = shift(ShiftKind::Asr, 0, 0x7FFF_FFFF, true);
        assert_eq!(r.result, 0);
        assert!(!r.carry);
    }

    #[test]
    fn ror_and_rrx() {
        let r = shift(ShiftKind::Ror, 8, 0x0000_00FF, false);
        assert_eq!(r.result, 0xFF00_0000);
        assert!(r.carry); // bit 7

        // ROR#0 encodes RRX.
        let r = shift(ShiftKind::Ror, 0, 0b11, true);
        assert_eq!(r.result, 0x8000_0001);
        assert!(r.carry);

        let r = shift(ShiftKind::Ror, 0, 0b10, false);
        assert_eq!(r.result, 0b1);
        assert!(!r.carry);

        // ROR#32 keeps the value, carry = bit 31.
        let r = shift(ShiftKind::Ror, 32, 0x8000_0001, false);
        assert_eq!(r.result, 0x8000_0001);
        assert!(r.carry);

        // ROR#36 behaves as ROR#4.
        let r = shift(ShiftKind::Ror, 36, 0x0000_00F0, false);
        assert_eq!(r.result, 0x0000_000F);
    }

    #[test]
    fn ror_undoes_rol() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let value: u32 = rng.gen();
            let amount = rng.gen_range(1..=31);
            let rolled = value.rotate_left(amount);
            let r = shift(ShiftKind::Ror, amount, rolled, false);
            assert_eq!(r.result, value);
        }
    }
}
