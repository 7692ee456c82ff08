use serde::{Deserialize, Serialize};

/// Transfer quantity for loads and stores.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum ReadWriteKind {
    /// A u32 value in ARM mode, u16 in Thumb mode.
    #[default]
    Word,

    /// A u8 value.
    Byte,
}

impl From<bool> for ReadWriteKind {
    fn from(value: bool) -> Self {
        if value {
            Self::Byte
        } else {
            Self::Word
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LoadStoreKind {
    Store,
    Load,
}

impl From<bool> for LoadStoreKind {
    fn from(b: bool) -> Self {
        match b {
            false => Self::Store,
            true => Self::Load,
        }
    }
}

impl std::fmt::Display for LoadStoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store => f.write_str("STR"),
            Self::Load => f.write_str("LDR"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Indexing {
    /// Add offset after transfer.
    Post,

    /// Add offset before transfer.
    Pre,
}

impl From<bool> for Indexing {
    fn from(state: bool) -> Self {
        match state {
            false => Self::Post,
            true => Self::Pre,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Offsetting {
    /// Subtract the offset from base.
    Down,

    /// Add the offset to base.
    Up,
}

impl From<bool> for Offsetting {
    fn from(state: bool) -> Self {
        match state {
            false => Self::Down,
            true => Self::Up,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OperandKind {
    Immediate,
    Register,
}

impl From<bool> for OperandKind {
    fn from(b: bool) -> Self {
        match b {
            false => Self::Register,
            true => Self::Immediate,
        }
    }
}

/// The four barrel-shifter operations, encoded in bits 6-5 of a shifted
/// register operand.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ShiftKind {
    Lsl,
    Lsr,
    Asr,
    Ror,
}

impl From<u32> for ShiftKind {
    fn from(value: u32) -> Self {
        match value {
            0b00 => Self::Lsl,
            0b01 => Self::Lsr,
            0b10 => Self::Asr,
            0b11 => Self::Ror,
            _ => unreachable!(),
        }
    }
}

impl From<u16> for ShiftKind {
    fn from(value: u16) -> Self {
        Self::from(value as u32)
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
        }
    }
}

/// Offset source for halfword and signed data transfers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HalfwordDataTransferOffsetKind {
    Immediate { offset: u32 },
    Register { register: u32 },
}

/// The four operations of the THUMB move/compare/add/subtract-immediate
/// format, encoded in bits 12-11.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operation {
    Mov,
    Cmp,
    Add,
    Sub,
}

impl From<u16> for Operation {
    fn from(value: u16) -> Self {
        match value {
            0b00 => Self::Mov,
            0b01 => Self::Cmp,
            0b10 => Self::Add,
            0b11 => Self::Sub,
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mov => f.write_str("MOV"),
            Self::Cmp => f.write_str("CMP"),
            Self::Add => f.write_str("ADD"),
            Self::Sub => f.write_str("SUB"),
        }
    }
}
