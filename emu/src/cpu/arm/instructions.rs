use crate::bitwise::Bits;
use crate::cpu::arm::alu_instruction::{
    AluSecondOperand, ArmAluOp, PsrKind, PsrOpKind, ShiftOperator,
};
use crate::cpu::flags::{
    HalfwordDataTransferOffsetKind, Indexing, LoadStoreKind, Offsetting, OperandKind,
    ReadWriteKind, ShiftKind,
};
use crate::cpu::DecodeError;

/// Halfword/signed transfer kind, from bits 6-5 of the instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HalfwordTransferKind {
    UnsignedHalfword,
    SignedByte,
    SignedHalfword,
}

impl From<u32> for HalfwordTransferKind {
    fn from(value: u32) -> Self {
        match value & 0b11 {
            0b01 => Self::UnsignedHalfword,
            0b10 => Self::SignedByte,
            0b11 => Self::SignedHalfword,
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for HalfwordTransferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsignedHalfword => f.write_str("H"),
            Self::SignedByte => f.write_str("SB"),
            Self::SignedHalfword => f.write_str("SH"),
        }
    }
}

/// The offset of a single data transfer: a 12-bit immediate or a register
/// shifted by an immediate amount.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SingleDataTransferOffset {
    Immediate {
        offset: u32,
    },
    Register {
        shift_amount: u32,
        shift_kind: ShiftKind,
        register: u32,
    },
}

impl std::fmt::Display for SingleDataTransferOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate { offset } => write!(f, "#{offset}"),
            Self::Register {
                shift_amount,
                shift_kind,
                register,
            } => write!(f, "R{register}, {shift_kind} #{shift_amount}"),
        }
    }
}

/// The multiply-long family, from bits 22-21.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MultiplyLongVariant {
    Umull,
    Umlal,
    Smull,
    Smlal,
}

impl From<u32> for MultiplyLongVariant {
    fn from(value: u32) -> Self {
        match value & 0b11 {
            0b00 => Self::Umull,
            0b01 => Self::Umlal,
            0b10 => Self::Smull,
            0b11 => Self::Smlal,
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for MultiplyLongVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Umull => f.write_str("UMULL"),
            Self::Umlal => f.write_str("UMLAL"),
            Self::Smull => f.write_str("SMULL"),
            Self::Smlal => f.write_str("SMLAL"),
        }
    }
}

/// A decoded ARM instruction. Each variant carries exactly the operand
/// fields its executor needs; the condition field is evaluated before
/// decoding and is not part of the record.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ArmInstruction {
    BranchAndExchange {
        register: u32,
    },
    BlockDataTransfer {
        indexing: Indexing,
        offsetting: Offsetting,
        load_psr: bool,
        write_back: bool,
        load_store: LoadStoreKind,
        base_register: u32,
        register_list: u32,
    },
    Branch {
        link: bool,
        /// 24-bit field already shifted left by 2; sign-extended at execute.
        offset: u32,
    },
    SoftwareInterrupt {
        comment: u32,
    },
    /// The architecturally undefined pattern. Decoded, never executed.
    Undefined,
    SingleDataTransfer {
        load_store: LoadStoreKind,
        quantity: ReadWriteKind,
        indexing: Indexing,
        offsetting: Offsetting,
        write_back: bool,
        rd: u32,
        base_register: u32,
        offset: SingleDataTransferOffset,
    },
    SingleDataSwap {
        quantity: ReadWriteKind,
        base_register: u32,
        rd: u32,
        rm: u32,
    },
    Multiply {
        accumulate: bool,
        set_flags: bool,
        rd: u32,
        rn: u32,
        rs: u32,
        rm: u32,
    },
    MultiplyLong {
        variant: MultiplyLongVariant,
        set_flags: bool,
        rdhi: u32,
        rdlo: u32,
        rs: u32,
        rm: u32,
    },
    HalfwordDataTransfer {
        indexing: Indexing,
        offsetting: Offsetting,
        write_back: bool,
        load_store: LoadStoreKind,
        offset_kind: HalfwordDataTransferOffsetKind,
        base_register: u32,
        rd: u32,
        transfer_kind: HalfwordTransferKind,
    },
    PsrTransfer {
        psr_kind: PsrKind,
        kind: PsrOpKind,
    },
    DataProcessing {
        opcode: ArmAluOp,
        set_flags: bool,
        rn: u32,
        rd: u32,
        op2: AluSecondOperand,
    },
}

fn decode_alu_second_operand(op_code: u32) -> AluSecondOperand {
    let op_kind: OperandKind = op_code.get_bit(25).into();
    match op_kind {
        OperandKind::Immediate => AluSecondOperand::Immediate {
            base: op_code.get_bits(0..=7),
            rotate: op_code.get_bits(8..=11) * 2,
        },
        OperandKind::Register => {
            let shift_kind: ShiftKind = op_code.get_bits(5..=6).into();
            let register = op_code.get_bits(0..=3);
            let shift_op = if op_code.get_bit(4) {
                ShiftOperator::Register(op_code.get_bits(8..=11))
            } else {
                ShiftOperator::Immediate(op_code.get_bits(7..=11))
            };

            AluSecondOperand::Register {
                shift_op,
                shift_kind,
                register,
            }
        }
    }
}

impl TryFrom<u32> for ArmInstruction {
    type Error = DecodeError;

    /// Classifies a 32-bit word by testing mask/format pairs in a fixed
    /// order; the first match wins.
    fn try_from(op_code: u32) -> Result<Self, Self::Error> {
        use ArmInstruction::*;

        if op_code & 0x0FFF_FFF0 == 0x012F_FF10 {
            Ok(BranchAndExchange {
                register: op_code.get_bits(0..=3),
            })
        } else if op_code & 0x0E00_0000 == 0x0800_0000 {
            Ok(BlockDataTransfer {
                indexing: op_code.get_bit(24).into(),
                offsetting: op_code.get_bit(23).into(),
                load_psr: op_code.get_bit(22),
                write_back: op_code.get_bit(21),
                load_store: op_code.get_bit(20).into(),
                base_register: op_code.get_bits(16..=19),
                register_list: op_code.get_bits(0..=15),
            })
        } else if op_code & 0x0F00_0000 == 0x0A00_0000 {
            Ok(Branch {
                link: false,
                offset: op_code.get_bits(0..=23) << 2,
            })
        } else if op_code & 0x0F00_0000 == 0x0B00_0000 {
            Ok(Branch {
                link: true,
                offset: op_code.get_bits(0..=23) << 2,
            })
        } else if op_code & 0x0F00_0000 == 0x0F00_0000 {
            Ok(SoftwareInterrupt {
                comment: op_code & 0x00FF_FFFF,
            })
        } else if op_code & 0x0E00_0010 == 0x0600_0010 {
            Ok(Undefined)
        } else if op_code & 0x0C00_0000 == 0x0400_0000 {
            let offset = if op_code.get_bit(25) {
                SingleDataTransferOffset::Register {
                    shift_amount: op_code.get_bits(7..=11),
                    shift_kind: op_code.get_bits(5..=6).into(),
                    register: op_code.get_bits(0..=3),
                }
            } else {
                SingleDataTransferOffset::Immediate {
                    offset: op_code.get_bits(0..=11),
                }
            };

            Ok(SingleDataTransfer {
                load_store: op_code.get_bit(20).into(),
                quantity: op_code.get_bit(22).into(),
                indexing: op_code.get_bit(24).into(),
                offsetting: op_code.get_bit(23).into(),
                write_back: op_code.get_bit(21),
                rd: op_code.get_bits(12..=15),
                base_register: op_code.get_bits(16..=19),
                offset,
            })
        } else if op_code & 0x0FB0_0FF0 == 0x0100_0090 {
            Ok(SingleDataSwap {
                quantity: op_code.get_bit(22).into(),
                base_register: op_code.get_bits(16..=19),
                rd: op_code.get_bits(12..=15),
                rm: op_code.get_bits(0..=3),
            })
        } else if op_code & 0x0FC0_00F0 == 0x0000_0090 {
            Ok(Multiply {
                accumulate: op_code.get_bit(21),
                set_flags: op_code.get_bit(20),
                rd: op_code.get_bits(16..=19),
                rn: op_code.get_bits(12..=15),
                rs: op_code.get_bits(8..=11),
                rm: op_code.get_bits(0..=3),
            })
        } else if op_code & 0x0F80_00F0 == 0x0080_0090 {
            Ok(MultiplyLong {
                variant: op_code.get_bits(21..=22).into(),
                set_flags: op_code.get_bit(20),
                rdhi: op_code.get_bits(16..=19),
                rdlo: op_code.get_bits(12..=15),
                rs: op_code.get_bits(8..=11),
                rm: op_code.get_bits(0..=3),
            })
        } else if op_code & 0x0E40_0F90 == 0x0000_0090 {
            Ok(HalfwordDataTransfer {
                indexing: op_code.get_bit(24).into(),
                offsetting: op_code.get_bit(23).into(),
                write_back: op_code.get_bit(21),
                load_store: op_code.get_bit(20).into(),
                offset_kind: HalfwordDataTransferOffsetKind::Register {
                    register: op_code.get_bits(0..=3),
                },
                base_register: op_code.get_bits(16..=19),
                rd: op_code.get_bits(12..=15),
                transfer_kind: op_code.get_bits(5..=6).into(),
            })
        } else if op_code & 0x0E40_0090 == 0x0040_0090 {
            let offset = (op_code.get_bits(8..=11) << 4) | op_code.get_bits(0..=3);

            Ok(HalfwordDataTransfer {
                indexing: op_code.get_bit(24).into(),
                offsetting: op_code.get_bit(23).into(),
                write_back: op_code.get_bit(21),
                load_store: op_code.get_bit(20).into(),
                offset_kind: HalfwordDataTransferOffsetKind::Immediate { offset },
                base_register: op_code.get_bits(16..=19),
                rd: op_code.get_bits(12..=15),
                transfer_kind: op_code.get_bits(5..=6).into(),
            })
        } else if op_code & 0x0FBF_0000 == 0x010F_0000 {
            Ok(PsrTransfer {
                psr_kind: op_code.get_bit(22).into(),
                kind: PsrOpKind::Mrs {
                    destination_register: op_code.get_bits(12..=15),
                },
            })
        } else if op_code & 0x0DB0_0000 == 0x0120_0000 {
            Ok(PsrTransfer {
                psr_kind: op_code.get_bit(22).into(),
                kind: PsrOpKind::Msr {
                    operand: decode_alu_second_operand(op_code),
                    field_mask: op_code.get_bits(16..=19),
                },
            })
        } else if op_code & 0x0C00_0000 == 0x0000_0000 {
            Ok(DataProcessing {
                opcode: op_code.get_bits(21..=24).into(),
                set_flags: op_code.get_bit(20),
                rn: op_code.get_bits(16..=19),
                rd: op_code.get_bits(12..=15),
                op2: decode_alu_second_operand(op_code),
            })
        } else {
            Err(DecodeError::Arm(op_code))
        }
    }
}

impl std::fmt::Display for ArmInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BranchAndExchange { register } => write!(f, "BX R{register}"),
            Self::BlockDataTransfer {
                indexing,
                offsetting,
                load_psr,
                write_back,
                load_store,
                base_register,
                register_list,
            } => {
                let op = match load_store {
                    LoadStoreKind::Store => "STM",
                    LoadStoreKind::Load => "LDM",
                };
                let direction = match offsetting {
                    Offsetting::Down => "D",
                    Offsetting::Up => "I",
                };
                let index_kind = match indexing {
                    Indexing::Pre => "B",
                    Indexing::Post => "A",
                };

                let mut registers = String::new();
                for i in 0..=15 {
                    if register_list.get_bit(i) {
                        if !registers.is_empty() {
                            registers.push_str(", ");
                        }
                        registers.push_str(&format!("R{i}"));
                    }
                }

                let wb = if *write_back { "!" } else { "" };
                let psr = if *load_psr { "^" } else { "" };
                write!(
                    f,
                    "{op}{direction}{index_kind} R{base_register}{wb}, {{{registers}}}{psr}"
                )
            }
            Self::Branch { link, offset } => {
                let l = if *link { "L" } else { "" };
                write!(f, "B{l} 0x{:08X}", offset.sign_extended(26))
            }
            Self::SoftwareInterrupt { comment } => write!(f, "SWI #0x{comment:X}"),
            Self::Undefined => f.write_str("UNDEFINED"),
            Self::SingleDataTransfer {
                load_store,
                quantity,
                indexing,
                offsetting,
                write_back,
                rd,
                base_register,
                offset,
            } => {
                let b = match quantity {
                    ReadWriteKind::Word => "",
                    ReadWriteKind::Byte => "B",
                };
                let sign = match offsetting {
                    Offsetting::Up => "+",
                    Offsetting::Down => "-",
                };
                let wb = if *write_back { "!" } else { "" };
                let address = match indexing {
                    Indexing::Pre => format!("[R{base_register}, {sign}{offset}]{wb}"),
                    Indexing::Post => format!("[R{base_register}], {sign}{offset}"),
                };

                write!(f, "{load_store}{b} R{rd}, {address}")
            }
            Self::SingleDataSwap {
                quantity,
                base_register,
                rd,
                rm,
            } => {
                let b = match quantity {
                    ReadWriteKind::Word => "",
                    ReadWriteKind::Byte => "B",
                };
                write!(f, "SWP{b} R{rd}, R{rm}, [R{base_register}]")
            }
            Self::Multiply {
                accumulate,
                set_flags,
                rd,
                rn,
                rs,
                rm,
            } => {
                let s = if *set_flags { "S" } else { "" };
                if *accumulate {
                    write!(f, "MLA{s} R{rd}, R{rm}, R{rs}, R{rn}")
                } else {
                    write!(f, "MUL{s} R{rd}, R{rm}, R{rs}")
                }
            }
            Self::MultiplyLong {
                variant,
                set_flags,
                rdhi,
                rdlo,
                rs,
                rm,
            } => {
                let s = if *set_flags { "S" } else { "" };
                write!(f, "{variant}{s} R{rdlo}, R{rdhi}, R{rm}, R{rs}")
            }
            Self::HalfwordDataTransfer {
                indexing,
                offsetting,
                write_back,
                load_store,
                offset_kind,
                base_register,
                rd,
                transfer_kind,
            } => {
                let sign = match offsetting {
                    Offsetting::Up => "+",
                    Offsetting::Down => "-",
                };
                let offset = match offset_kind {
                    HalfwordDataTransferOffsetKind::Immediate { offset } => {
                        if *offset == 0 {
                            String::new()
                        } else {
                            format!(", #{sign}{offset}")
                        }
                    }
                    HalfwordDataTransferOffsetKind::Register { register } => {
                        format!(", {sign}R{register}")
                    }
                };
                let wb = if *write_back { "!" } else { "" };
                let address = match indexing {
                    Indexing::Pre => format!("[R{base_register}{offset}]{wb}"),
                    Indexing::Post => format!("[R{base_register}]{offset}"),
                };

                write!(f, "{load_store}{transfer_kind} R{rd}, {address}")
            }
            Self::PsrTransfer { psr_kind, kind } => match kind {
                PsrOpKind::Mrs {
                    destination_register,
                } => write!(f, "MRS R{destination_register}, {psr_kind}"),
                PsrOpKind::Msr {
                    operand,
                    field_mask,
                } => {
                    let mut fields = String::new();
                    for (bit, name) in [(3, 'f'), (2, 's'), (1, 'x'), (0, 'c')] {
                        if field_mask.get_bit(bit) {
                            fields.push(name);
                        }
                    }
                    write!(f, "MSR {psr_kind}_{fields}, {operand}")
                }
            },
            Self::DataProcessing {
                opcode,
                set_flags,
                rn,
                rd,
                op2,
            } => {
                let s = if *set_flags { "S" } else { "" };
                if opcode.is_test() {
                    write!(f, "{opcode} R{rn}, {op2}")
                } else if matches!(opcode, ArmAluOp::Mov | ArmAluOp::Mvn) {
                    write!(f, "{opcode}{s} R{rd}, {op2}")
                } else {
                    write!(f, "{opcode}{s} R{rd}, R{rn}, {op2}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(op_code: u32) -> ArmInstruction {
        ArmInstruction::try_from(op_code).unwrap()
    }

    #[test]
    fn decode_branch() {
        let output = decode(0b1110_1010_0000_0000_0000_0000_0111_1111);
        assert_eq!(
            output,
            ArmInstruction::Branch {
                link: false,
                offset: 508,
            }
        );

        let output = decode(0b1110_1011_0000_0000_0000_0000_0111_1111);
        assert_eq!(
            output,
            ArmInstruction::Branch {
                link: true,
                offset: 508,
            }
        );
        assert_eq!(output.to_string(), "BL 0x000001FC");
    }

    #[test]
    fn decode_branch_and_exchange() {
        let output = decode(0b1110_0001_0010_1111_1111_1111_0001_0001);
        assert_eq!(output, ArmInstruction::BranchAndExchange { register: 1 });
        assert_eq!(output.to_string(), "BX R1");
    }

    #[test]
    fn decode_block_data_transfer() {
        // LDMIA R13!, {R1, R5, R7}
        let output = decode(0b1110_1000_1011_1101_0000_0000_1010_0010);
        assert_eq!(
            output,
            ArmInstruction::BlockDataTransfer {
                indexing: Indexing::Post,
                offsetting: Offsetting::Up,
                load_psr: false,
                write_back: true,
                load_store: LoadStoreKind::Load,
                base_register: 13,
                register_list: 0b0000_0000_1010_0010,
            }
        );
        assert_eq!(output.to_string(), "LDMIA R13!, {R1, R5, R7}");
    }

    #[test]
    fn decode_software_interrupt() {
        let output = decode(0xEF06_0000);
        assert_eq!(
            output,
            ArmInstruction::SoftwareInterrupt { comment: 0x60000 }
        );
    }

    #[test]
    fn decode_undefined() {
        let output = decode(0b1110_0110_0000_0000_0000_0000_0001_0000);
        assert_eq!(output, ArmInstruction::Undefined);
    }

    #[test]
    fn decode_single_data_transfer() {
        // LDR R0, [R1, #0]
        let output = decode(0b1110_0101_1001_0001_0000_0000_0000_0000);
        assert_eq!(
            output,
            ArmInstruction::SingleDataTransfer {
                load_store: LoadStoreKind::Load,
                quantity: ReadWriteKind::Word,
                indexing: Indexing::Pre,
                offsetting: Offsetting::Up,
                write_back: false,
                rd: 0,
                base_register: 1,
                offset: SingleDataTransferOffset::Immediate { offset: 0 },
            }
        );
    }

    #[test]
    fn decode_single_data_swap() {
        // SWP R2, R3, [R4]
        let output = decode(0b1110_0001_0000_0100_0010_0000_1001_0011);
        assert_eq!(
            output,
            ArmInstruction::SingleDataSwap {
                quantity: ReadWriteKind::Word,
                base_register: 4,
                rd: 2,
                rm: 3,
            }
        );
    }

    #[test]
    fn decode_multiply() {
        // MLA R6, R2, R3, R4
        let output = decode(0b1110_0000_0010_0110_0100_0011_1001_0010);
        assert_eq!(
            output,
            ArmInstruction::Multiply {
                accumulate: true,
                set_flags: false,
                rd: 6,
                rn: 4,
                rs: 3,
                rm: 2,
            }
        );
    }

    #[test]
    fn decode_multiply_long() {
        // UMULLS R4, R5, R2, R3
        let output = decode(0b1110_0000_1001_0101_0100_0011_1001_0010);
        assert_eq!(
            output,
            ArmInstruction::MultiplyLong {
                variant: MultiplyLongVariant::Umull,
                set_flags: true,
                rdhi: 5,
                rdlo: 4,
                rs: 3,
                rm: 2,
            }
        );

        // SMLAL R4, R5, R2, R3
        let output = decode(0b1110_0000_1110_0101_0100_0011_1001_0010);
        assert!(matches!(
            output,
            ArmInstruction::MultiplyLong {
                variant: MultiplyLongVariant::Smlal,
                ..
            }
        ));
    }

    #[test]
    fn decode_halfword_data_transfer_register_offset() {
        // STRH R0, [R2, +R1]
        let output = decode(0b1110_0001_1000_0010_0000_0000_1011_0001);
        assert_eq!(
            output,
            ArmInstruction::HalfwordDataTransfer {
                indexing: Indexing::Pre,
                offsetting: Offsetting::Up,
                write_back: false,
                load_store: LoadStoreKind::Store,
                offset_kind: HalfwordDataTransferOffsetKind::Register { register: 1 },
                base_register: 2,
                rd: 0,
                transfer_kind: HalfwordTransferKind::UnsignedHalfword,
            }
        );
    }

    #[test]
    fn decode_halfword_data_transfer_immediate_offset() {
        // LDRSH R1, [R0, #-31]
        let output = decode(0b1110_0001_0101_0000_0001_0001_1111_1111);
        assert_eq!(
            output,
            ArmInstruction::HalfwordDataTransfer {
                indexing: Indexing::Pre,
                offsetting: Offsetting::Down,
                write_back: false,
                load_store: LoadStoreKind::Load,
                offset_kind: HalfwordDataTransferOffsetKind::Immediate { offset: 0b11111 },
                base_register: 0,
                rd: 1,
                transfer_kind: HalfwordTransferKind::SignedHalfword,
            }
        );
    }

    #[test]
    fn decode_mrs() {
        // MRS R5, CPSR
        let output = decode(0b1110_0001_0000_1111_0101_0000_0000_0000);
        assert_eq!(
            output,
            ArmInstruction::PsrTransfer {
                psr_kind: PsrKind::Cpsr,
                kind: PsrOpKind::Mrs {
                    destination_register: 5
                },
            }
        );
    }

    #[test]
    fn decode_msr() {
        // MSR SPSR_fsxc, R14
        let output = decode(0b1110_0001_0110_1111_1111_0000_0000_1110);
        assert_eq!(
            output,
            ArmInstruction::PsrTransfer {
                psr_kind: PsrKind::Spsr,
                kind: PsrOpKind::Msr {
                    operand: AluSecondOperand::Register {
                        shift_op: ShiftOperator::Immediate(0),
                        shift_kind: ShiftKind::Lsl,
                        register: 14,
                    },
                    field_mask: 0b1111,
                },
            }
        );

        // MSR CPSR_f, #0xF0000000 (immediate form)
        let output = decode(0b1110_0011_0010_1000_1111_0010_0000_1111);
        assert_eq!(
            output,
            ArmInstruction::PsrTransfer {
                psr_kind: PsrKind::Cpsr,
                kind: PsrOpKind::Msr {
                    operand: AluSecondOperand::Immediate {
                        base: 0b1111,
                        rotate: 4,
                    },
                    field_mask: 0b1000,
                },
            }
        );
    }

    #[test]
    fn decode_data_processing() {
        // MOV R0, #0x12
        let output = decode(0b1110_0011_1010_0000_0000_0000_0001_0010);
        assert_eq!(
            output,
            ArmInstruction::DataProcessing {
                opcode: ArmAluOp::Mov,
                set_flags: false,
                rn: 0,
                rd: 0,
                op2: AluSecondOperand::Immediate {
                    base: 0x12,
                    rotate: 0
                },
            }
        );

        // ADDS R2, R0, R1, LSL #3
        let output = decode(0b1110_0000_1001_0000_0010_0001_1000_0001);
        assert_eq!(
            output,
            ArmInstruction::DataProcessing {
                opcode: ArmAluOp::Add,
                set_flags: true,
                rn: 0,
                rd: 2,
                op2: AluSecondOperand::Register {
                    shift_op: ShiftOperator::Immediate(3),
                    shift_kind: ShiftKind::Lsl,
                    register: 1,
                },
            }
        );

        // CMP R0, R1 (S bit set distinguishes it from PSR transfers)
        let output = decode(0b1110_0001_0101_0000_0000_0000_0000_0001);
        assert!(matches!(
            output,
            ArmInstruction::DataProcessing {
                opcode: ArmAluOp::Cmp,
                set_flags: true,
                ..
            }
        ));
    }

    #[test]
    fn coprocessor_space_is_a_decode_error() {
        // MCR p15 encoding lands outside every mask.
        assert!(ArmInstruction::try_from(0xEE01_0F10).is_err());
    }
}
