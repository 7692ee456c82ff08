/// The sixteen operations of the THUMB ALU format, encoded in bits 9-6.
/// All of them set the condition codes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ThumbAluOp {
    And = 0x0,
    Eor = 0x1,
    Lsl = 0x2,
    Lsr = 0x3,
    Asr = 0x4,
    Adc = 0x5,
    Sbc = 0x6,
    Ror = 0x7,
    Tst = 0x8,
    Neg = 0x9,
    Cmp = 0xA,
    Cmn = 0xB,
    Orr = 0xC,
    Mul = 0xD,
    Bic = 0xE,
    Mvn = 0xF,
}

impl From<u16> for ThumbAluOp {
    fn from(value: u16) -> Self {
        match value {
            0x0 => Self::And,
            0x1 => Self::Eor,
            0x2 => Self::Lsl,
            0x3 => Self::Lsr,
            0x4 => Self::Asr,
            0x5 => Self::Adc,
            0x6 => Self::Sbc,
            0x7 => Self::Ror,
            0x8 => Self::Tst,
            0x9 => Self::Neg,
            0xA => Self::Cmp,
            0xB => Self::Cmn,
            0xC => Self::Orr,
            0xD => Self::Mul,
            0xE => Self::Bic,
            0xF => Self::Mvn,
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for ThumbAluOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Eor => f.write_str("EOR"),
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Adc => f.write_str("ADC"),
            Self::Sbc => f.write_str("SBC"),
            Self::Ror => f.write_str("ROR"),
            Self::Tst => f.write_str("TST"),
            Self::Neg => f.write_str("NEG"),
            Self::Cmp => f.write_str("CMP"),
            Self::Cmn => f.write_str("CMN"),
            Self::Orr => f.write_str("ORR"),
            Self::Mul => f.write_str("MUL"),
            Self::Bic => f.write_str("BIC"),
            Self::Mvn => f.write_str("MVN"),
        }
    }
}

/// The hi-register operations (format 5), encoded in bits 9-8. The first
/// three combine a low register with a high one; BX takes the branch target
/// from any register.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ThumbHighRegisterOp {
    Add,
    Cmp,
    Mov,
    Bx,
}

impl From<u16> for ThumbHighRegisterOp {
    fn from(value: u16) -> Self {
        match value {
            0b00 => Self::Add,
            0b01 => Self::Cmp,
            0b10 => Self::Mov,
            0b11 => Self::Bx,
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for ThumbHighRegisterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => f.write_str("ADD"),
            Self::Cmp => f.write_str("CMP"),
            Self::Mov => f.write_str("MOV"),
            Self::Bx => f.write_str("BX"),
        }
    }
}
