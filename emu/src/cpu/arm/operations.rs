use crate::bitwise::Bits;
use crate::cpu::arm::alu_instruction::{
    shift, AluKind, AluSecondOperand, ArithmeticOpResult, ArmAluOp, PsrKind, PsrOpKind,
    ShiftOperator,
};
use crate::cpu::arm::instructions::{
    ArmInstruction, HalfwordTransferKind, MultiplyLongVariant, SingleDataTransferOffset,
};
use crate::cpu::arm7tdmi::Arm7tdmi;
use crate::cpu::cpu_modes::Mode;
use crate::cpu::flags::{
    HalfwordDataTransferOffsetKind, Indexing, LoadStoreKind, Offsetting, ReadWriteKind,
};
use crate::cpu::registers::{REG_LR, REG_PC};

impl Arm7tdmi {
    /// Executes one decoded ARM instruction and returns its cycle cost.
    pub(crate) fn execute_arm(&mut self, instruction: ArmInstruction) -> u32 {
        match instruction {
            ArmInstruction::DataProcessing {
                opcode,
                set_flags,
                rn,
                rd,
                op2,
            } => self.data_processing(opcode, set_flags, rn, rd, op2),
            ArmInstruction::PsrTransfer { psr_kind, kind } => self.psr_transfer(psr_kind, kind),
            ArmInstruction::Multiply {
                accumulate,
                set_flags,
                rd,
                rn,
                rs,
                rm,
            } => self.multiply(accumulate, set_flags, rd, rn, rs, rm),
            ArmInstruction::MultiplyLong {
                variant,
                set_flags,
                rdhi,
                rdlo,
                rs,
                rm,
            } => self.multiply_long(variant, set_flags, rdhi, rdlo, rs, rm),
            ArmInstruction::SingleDataSwap {
                quantity,
                base_register,
                rd,
                rm,
            } => self.single_data_swap(quantity, base_register, rd, rm),
            ArmInstruction::BranchAndExchange { register } => self.branch_and_exchange(register),
            ArmInstruction::HalfwordDataTransfer {
                indexing,
                offsetting,
                write_back,
                load_store,
                offset_kind,
                base_register,
                rd,
                transfer_kind,
            } => self.halfword_data_transfer(
                indexing,
                offsetting,
                write_back,
                load_store,
                offset_kind,
                base_register,
                rd,
                transfer_kind,
            ),
            ArmInstruction::SingleDataTransfer {
                load_store,
                quantity,
                indexing,
                offsetting,
                write_back,
                rd,
                base_register,
                offset,
            } => self.single_data_transfer(
                load_store,
                quantity,
                indexing,
                offsetting,
                write_back,
                rd,
                base_register,
                offset,
            ),
            ArmInstruction::BlockDataTransfer {
                indexing,
                offsetting,
                load_psr,
                write_back,
                load_store,
                base_register,
                register_list,
            } => self.block_data_transfer(
                indexing,
                offsetting,
                load_psr,
                write_back,
                load_store,
                base_register,
                register_list,
            ),
            ArmInstruction::Branch { link, offset } => self.branch(link, offset),
            ArmInstruction::SoftwareInterrupt { comment } => {
                // The BIOS dispatches on the upper byte of the 24-bit field.
                self.software_interrupt(comment >> 16, crate::cpu::arm::SIZE_OF_INSTRUCTION)
            }
            ArmInstruction::Undefined => self.undefined_instruction(),
        }
    }

    /// Unsigned sum with carry/overflow computed in 64 bits.
    pub(crate) fn add_inner_op(first_op: u32, second_op: u32) -> ArithmeticOpResult {
        Self::adc_inner_op(first_op, second_op, false)
    }

    pub(crate) fn adc_inner_op(first_op: u32, second_op: u32, carry: bool) -> ArithmeticOpResult {
        let wide = first_op as u64 + second_op as u64 + carry as u64;
        let result = wide as u32;

        ArithmeticOpResult {
            result,
            carry: wide > u32::MAX as u64,
            // overflow only occurs when the operands share a sign and the
            // result has the opposite one
            overflow: (!(first_op ^ second_op) & (first_op ^ result)).get_bit(31),
            sign: result.get_bit(31),
            zero: result == 0,
        }
    }

    /// Subtraction. C is the no-borrow flag: set iff `first_op >= second_op`
    /// unsigned.
    pub(crate) fn sub_inner_op(first_op: u32, second_op: u32) -> ArithmeticOpResult {
        Self::sbc_inner_op(first_op, second_op, true)
    }

    /// `first_op - second_op - 1 + carry`, computed as `a + !b + carry` so
    /// the carry-out is the no-borrow flag.
    pub(crate) fn sbc_inner_op(first_op: u32, second_op: u32, carry: bool) -> ArithmeticOpResult {
        let wide = first_op as u64 + (!second_op) as u64 + carry as u64;
        let result = wide as u32;

        ArithmeticOpResult {
            result,
            carry: wide > u32::MAX as u64,
            overflow: ((first_op ^ second_op) & (first_op ^ result)).get_bit(31),
            sign: result.get_bit(31),
            zero: result == 0,
        }
    }

    /// Resolves a data-processing second operand through the barrel shifter.
    /// When `set_shifter_carry` is set, the shifter's carry-out lands in the
    /// CPSR (logical opcodes with S, Rd != PC).
    fn eval_alu_second_operand(&mut self, op2: AluSecondOperand, set_shifter_carry: bool) -> u32 {
        match op2 {
            AluSecondOperand::Immediate { base, rotate } => {
                let value = base.rotate_right(rotate);
                if set_shifter_carry && rotate != 0 {
                    self.registers.cpsr.set_carry_flag(value.get_bit(31));
                }

                value
            }
            AluSecondOperand::Register {
                shift_op,
                shift_kind,
                register,
            } => {
                let rm = self
                    .registers
                    .read_reg(register as usize)
                    .wrapping_add(self.alu_pc_offset(register, op2));

                let amount = match shift_op {
                    ShiftOperator::Immediate(amount) => amount,
                    ShiftOperator::Register(rs) => {
                        let amount = self.registers.read_reg(rs as usize) & 0xFF;
                        // Shift by a register holding 0 leaves value and
                        // carry untouched; the 0 special encodings apply to
                        // immediate amounts only.
                        if amount == 0 {
                            return rm;
                        }

                        amount
                    }
                };

                let result = shift(shift_kind, amount, rm, self.registers.cpsr.carry_flag());
                if set_shifter_carry {
                    self.registers.cpsr.set_carry_flag(result.carry);
                }

                result.result
            }
        }
    }

    /// Extra displacement observed when R15 is an ALU operand: a
    /// shift-by-register second operand costs an internal cycle, so the
    /// prefetch advances once more and R15 reads ahead by 12 instead of 8.
    fn alu_pc_offset(&self, register: u32, op2: AluSecondOperand) -> u32 {
        let by_register = matches!(
            op2,
            AluSecondOperand::Register {
                shift_op: ShiftOperator::Register(_),
                ..
            }
        );

        if register as usize == REG_PC && by_register {
            4
        } else {
            0
        }
    }

    pub(crate) fn data_processing(
        &mut self,
        opcode: ArmAluOp,
        set_flags: bool,
        rn: u32,
        rd: u32,
        op2: AluSecondOperand,
    ) -> u32 {
        let op1 = self
            .registers
            .read_reg(rn as usize)
            .wrapping_add(self.alu_pc_offset(rn, op2));

        let shift_by_register = matches!(
            op2,
            AluSecondOperand::Register {
                shift_op: ShiftOperator::Register(_),
                ..
            }
        );

        let writes_rd = !opcode.is_test();
        // S with Rd = PC does not compute flags: CPSR is restored from the
        // SPSR of the current mode, atomically with the PC write.
        let restore_spsr = set_flags && writes_rd && rd as usize == REG_PC;
        let s = set_flags && !restore_spsr;
        let set_shifter_carry = s && opcode.kind() == AluKind::Logical;

        let op2 = self.eval_alu_second_operand(op2, set_shifter_carry);

        if restore_spsr {
            let spsr = self.registers.read_spsr();
            self.registers.cpsr = spsr;
        }

        let rd = rd as usize;
        use ArmAluOp::*;
        match opcode {
            And => self.and(rd, op1, op2, s),
            Eor => self.eor(rd, op1, op2, s),
            Sub => self.sub(rd, op1, op2, s),
            Rsb => self.sub(rd, op2, op1, s),
            Add => self.add(rd, op1, op2, s),
            Adc => self.adc(rd, op1, op2, s),
            Sbc => self.sbc(rd, op1, op2, s),
            Rsc => self.sbc(rd, op2, op1, s),
            Tst => self.tst(op1, op2),
            Teq => self.teq(op1, op2),
            Cmp => self.cmp(op1, op2),
            Cmn => self.cmn(op1, op2),
            Orr => self.orr(rd, op1, op2, s),
            Mov => self.mov(rd, op2, s),
            Bic => self.bic(rd, op1, op2, s),
            Mvn => self.mvn(rd, op2, s),
        }

        let mut cycles = 1;
        if shift_by_register {
            cycles += 1;
        }
        if writes_rd && rd == REG_PC {
            cycles += 2;
        }

        cycles
    }

    pub(crate) fn and(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = rn & op2;
        self.registers.write_reg(rd, result);

        if s {
            self.registers.cpsr.set_zero_flag(result == 0);
            self.registers.cpsr.set_sign_flag(result.get_bit(31));
        }
    }

    pub(crate) fn eor(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = rn ^ op2;
        self.registers.write_reg(rd, result);

        if s {
            self.registers.cpsr.set_zero_flag(result == 0);
            self.registers.cpsr.set_sign_flag(result.get_bit(31));
        }
    }

    pub(crate) fn orr(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = rn | op2;
        self.registers.write_reg(rd, result);

        if s {
            self.registers.cpsr.set_zero_flag(result == 0);
            self.registers.cpsr.set_sign_flag(result.get_bit(31));
        }
    }

    pub(crate) fn bic(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = rn & !op2;
        self.registers.write_reg(rd, result);

        if s {
            self.registers.cpsr.set_zero_flag(result == 0);
            self.registers.cpsr.set_sign_flag(result.get_bit(31));
        }
    }

    pub(crate) fn mov(&mut self, rd: usize, op2: u32, s: bool) {
        self.registers.write_reg(rd, op2);

        if s {
            self.registers.cpsr.set_zero_flag(op2 == 0);
            self.registers.cpsr.set_sign_flag(op2.get_bit(31));
        }
    }

    pub(crate) fn mvn(&mut self, rd: usize, op2: u32, s: bool) {
        let result = !op2;
        self.registers.write_reg(rd, result);

        if s {
            self.registers.cpsr.set_zero_flag(result == 0);
            self.registers.cpsr.set_sign_flag(result.get_bit(31));
        }
    }

    pub(crate) fn add(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = Self::add_inner_op(rn, op2);
        self.registers.write_reg(rd, result.result);

        if s {
            self.registers.cpsr.set_flags(result);
        }
    }

    pub(crate) fn adc(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = Self::adc_inner_op(rn, op2, self.registers.cpsr.carry_flag());
        self.registers.write_reg(rd, result.result);

        if s {
            self.registers.cpsr.set_flags(result);
        }
    }

    pub(crate) fn sub(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = Self::sub_inner_op(rn, op2);
        self.registers.write_reg(rd, result.result);

        if s {
            self.registers.cpsr.set_flags(result);
        }
    }

    pub(crate) fn sbc(&mut self, rd: usize, rn: u32, op2: u32, s: bool) {
        let result = Self::sbc_inner_op(rn, op2, self.registers.cpsr.carry_flag());
        self.registers.write_reg(rd, result.result);

        if s {
            self.registers.cpsr.set_flags(result);
        }
    }

    /// Subtracts rs from zero and stores the result in rd, setting flags.
    pub(crate) fn neg(&mut self, rd: usize, rs: u32) {
        self.sub(rd, 0, rs, true);
    }

    pub(crate) fn tst(&mut self, rn: u32, op2: u32) {
        let value = rn & op2;
        self.registers.cpsr.set_sign_flag(value.get_bit(31));
        self.registers.cpsr.set_zero_flag(value == 0);
    }

    pub(crate) fn teq(&mut self, rn: u32, op2: u32) {
        let value = rn ^ op2;
        self.registers.cpsr.set_sign_flag(value.get_bit(31));
        self.registers.cpsr.set_zero_flag(value == 0);
    }

    pub(crate) fn cmp(&mut self, rn: u32, op2: u32) {
        let result = Self::sub_inner_op(rn, op2);
        self.registers.cpsr.set_flags(result);
    }

    pub(crate) fn cmn(&mut self, rn: u32, op2: u32) {
        let result = Self::add_inner_op(rn, op2);
        self.registers.cpsr.set_flags(result);
    }

    pub(crate) fn psr_transfer(&mut self, psr_kind: PsrKind, kind: PsrOpKind) -> u32 {
        match kind {
            PsrOpKind::Mrs {
                destination_register,
            } => {
                let value = match psr_kind {
                    PsrKind::Cpsr => self.registers.read_cpsr(),
                    PsrKind::Spsr => self.registers.read_spsr().value(),
                };
                self.registers
                    .write_reg(destination_register as usize, value);
            }
            PsrOpKind::Msr {
                operand,
                field_mask,
            } => {
                let value = match operand {
                    AluSecondOperand::Register { register, .. } => {
                        self.registers.read_reg(register as usize)
                    }
                    AluSecondOperand::Immediate { base, rotate } => base.rotate_right(rotate),
                };

                // In User mode only the flag field is writable; the other
                // selected fields are ignored silently.
                let mut mask = 0u32;
                if field_mask.get_bit(3) {
                    mask |= 0xFF00_0000;
                }
                if self.registers.cpsr.mode() != Mode::User {
                    if field_mask.get_bit(2) {
                        mask |= 0x00FF_0000;
                    }
                    if field_mask.get_bit(1) {
                        mask |= 0x0000_FF00;
                    }
                    if field_mask.get_bit(0) {
                        mask |= 0x0000_00FF;
                    }
                }

                match psr_kind {
                    PsrKind::Cpsr => {
                        let old = self.registers.read_cpsr();
                        let new = (old & !mask) | (value & mask);
                        if (old ^ new).get_bit(5) {
                            tracing::warn!("MSR changed the T bit, pipeline refills");
                        }
                        self.registers.write_cpsr(new);
                    }
                    PsrKind::Spsr => {
                        let old = self.registers.read_spsr().value();
                        let new = (old & !mask) | (value & mask);
                        self.registers.write_spsr(new.into());
                    }
                }
            }
        }

        1
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn single_data_transfer(
        &mut self,
        load_store: LoadStoreKind,
        quantity: ReadWriteKind,
        indexing: Indexing,
        offsetting: Offsetting,
        write_back: bool,
        rd: u32,
        base_register: u32,
        offset: SingleDataTransferOffset,
    ) -> u32 {
        let base = self.registers.read_reg(base_register as usize);

        let amount = match offset {
            SingleDataTransferOffset::Immediate { offset } => offset,
            SingleDataTransferOffset::Register {
                shift_amount,
                shift_kind,
                register,
            } => {
                let rm = self.registers.read_reg(register as usize);
                shift(
                    shift_kind,
                    shift_amount,
                    rm,
                    self.registers.cpsr.carry_flag(),
                )
                .result
            }
        };

        let offset_address = match offsetting {
            Offsetting::Down => base.wrapping_sub(amount),
            Offsetting::Up => base.wrapping_add(amount),
        };

        let address = match indexing {
            Indexing::Pre => offset_address,
            Indexing::Post => base,
        };

        // Post-indexing always writes back; pre-indexing only with W.
        let writes_back = indexing == Indexing::Post || write_back;
        let rd = rd as usize;

        match load_store {
            LoadStoreKind::Store => {
                let mut value = self.registers.read_reg(rd);
                // A stored R15 reads one fetch further ahead.
                if rd == REG_PC {
                    value = value.wrapping_add(4);
                }

                match quantity {
                    ReadWriteKind::Word => self.bus.write32(address, value),
                    ReadWriteKind::Byte => self.bus.write8(address, value as u8),
                }

                if writes_back {
                    self.registers
                        .write_reg(base_register as usize, offset_address);
                }

                2
            }
            LoadStoreKind::Load => {
                // Write-back first: a load into the base register wins.
                if writes_back {
                    self.registers
                        .write_reg(base_register as usize, offset_address);
                }

                let value = match quantity {
                    ReadWriteKind::Word => self.bus.read32(address),
                    ReadWriteKind::Byte => self.bus.read8(address) as u32,
                };
                self.registers.write_reg(rd, value);

                if rd == REG_PC {
                    5
                } else {
                    3
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn halfword_data_transfer(
        &mut self,
        indexing: Indexing,
        offsetting: Offsetting,
        write_back: bool,
        load_store: LoadStoreKind,
        offset_kind: HalfwordDataTransferOffsetKind,
        base_register: u32,
        rd: u32,
        transfer_kind: HalfwordTransferKind,
    ) -> u32 {
        let base = self.registers.read_reg(base_register as usize);

        let amount = match offset_kind {
            HalfwordDataTransferOffsetKind::Immediate { offset } => offset,
            HalfwordDataTransferOffsetKind::Register { register } => {
                self.registers.read_reg(register as usize)
            }
        };

        let offset_address = match offsetting {
            Offsetting::Down => base.wrapping_sub(amount),
            Offsetting::Up => base.wrapping_add(amount),
        };

        let address = match indexing {
            Indexing::Pre => offset_address,
            Indexing::Post => base,
        };

        let writes_back = indexing == Indexing::Post || write_back;
        let rd = rd as usize;

        match load_store {
            LoadStoreKind::Store => {
                let mut value = self.registers.read_reg(rd);
                if rd == REG_PC {
                    value = value.wrapping_add(4);
                }

                match transfer_kind {
                    HalfwordTransferKind::UnsignedHalfword => {
                        self.bus.write16(address, value as u16);
                    }
                    _ => {
                        tracing::warn!("signed store encoding at 0x{address:08X}, ignored");
                    }
                }

                if writes_back {
                    self.registers
                        .write_reg(base_register as usize, offset_address);
                }

                2
            }
            LoadStoreKind::Load => {
                if writes_back {
                    self.registers
                        .write_reg(base_register as usize, offset_address);
                }

                let value = match transfer_kind {
                    HalfwordTransferKind::UnsignedHalfword => self.bus.read16(address) as u32,
                    HalfwordTransferKind::SignedByte => {
                        (self.bus.read8(address) as u32).sign_extended(8)
                    }
                    HalfwordTransferKind::SignedHalfword => {
                        // At an odd address only the addressed byte is
                        // meaningful; it loads sign-extended.
                        if address & 1 == 1 {
                            (self.bus.read8(address) as u32).sign_extended(8)
                        } else {
                            (self.bus.read16(address) as u32).sign_extended(16)
                        }
                    }
                };
                self.registers.write_reg(rd, value);

                if rd == REG_PC {
                    5
                } else {
                    3
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn block_data_transfer(
        &mut self,
        indexing: Indexing,
        offsetting: Offsetting,
        load_psr: bool,
        write_back: bool,
        load_store: LoadStoreKind,
        base_register: u32,
        register_list: u32,
    ) -> u32 {
        let mut address = self.registers.read_reg(base_register as usize);
        let pc_listed = register_list.get_bit(15);

        // S bit: STM and LDM without R15 transfer the User bank; LDM with
        // R15 keeps the current bank and restores CPSR from SPSR at the end.
        let user_bank = load_psr && !(load_store == LoadStoreKind::Load && pc_listed);

        let step = |address: u32| match offsetting {
            Offsetting::Down => address.wrapping_sub(4),
            Offsetting::Up => address.wrapping_add(4),
        };

        // Scanning ascending when incrementing and descending when
        // decrementing keeps the lowest register at the lowest address.
        let registers: Box<dyn Iterator<Item = u8>> = match offsetting {
            Offsetting::Up => Box::new(0..=15),
            Offsetting::Down => Box::new((0..=15).rev()),
        };

        for reg in registers {
            if !register_list.get_bit(reg) {
                continue;
            }

            if indexing == Indexing::Pre {
                address = step(address);
            }

            let reg = reg as usize;
            match load_store {
                LoadStoreKind::Store => {
                    let mut value = if user_bank {
                        self.registers.read_reg_user_bank(reg)
                    } else {
                        self.registers.read_reg(reg)
                    };
                    if reg == REG_PC {
                        value = value.wrapping_add(4);
                    }
                    self.bus.write32(address, value);
                }
                LoadStoreKind::Load => {
                    let value = self.bus.read32(address);
                    if user_bank {
                        self.registers.write_reg_user_bank(reg, value);
                    } else {
                        self.registers.write_reg(reg, value);
                    }
                }
            }

            if indexing == Indexing::Post {
                address = step(address);
            }
        }

        // A load that includes the base register wins over write-back.
        let base_loaded = load_store == LoadStoreKind::Load
            && register_list.get_bit(base_register as u8);
        if write_back && !base_loaded {
            self.registers.write_reg(base_register as usize, address);
        }

        if load_store == LoadStoreKind::Load && pc_listed && load_psr {
            let spsr = self.registers.read_spsr();
            self.registers.cpsr = spsr;
        }

        let count = register_list.count_ones();
        match load_store {
            LoadStoreKind::Load => count + 2,
            LoadStoreKind::Store => count + 1,
        }
    }

    pub(crate) fn single_data_swap(
        &mut self,
        quantity: ReadWriteKind,
        base_register: u32,
        rd: u32,
        rm: u32,
    ) -> u32 {
        let address = self.registers.read_reg(base_register as usize);
        let source = self.registers.read_reg(rm as usize);

        let old = match quantity {
            ReadWriteKind::Word => {
                let old = self.bus.read32(address);
                self.bus.write32(address, source);
                old
            }
            ReadWriteKind::Byte => {
                let old = self.bus.read8(address) as u32;
                self.bus.write8(address, source as u8);
                old
            }
        };
        self.registers.write_reg(rd as usize, old);

        4
    }

    pub(crate) fn branch(&mut self, link: bool, offset: u32) -> u32 {
        let offset = offset.sign_extended(26) as i32;
        let pc = self.registers.program_counter();

        if link {
            // LR receives the instruction after the branch: the visible PC
            // is two fetches ahead, so back up one.
            self.registers.write_reg(REG_LR, pc.wrapping_sub(4));
        }

        self.registers
            .set_program_counter(pc.wrapping_add_signed(offset));

        3
    }

    pub(crate) fn branch_and_exchange(&mut self, register: u32) -> u32 {
        let target = self.registers.read_reg(register as usize);

        // Bit 0 of the target selects the instruction set; the PC write
        // masks to the alignment of the new set.
        self.registers.cpsr.set_cpu_state(target.get_bit(0).into());
        self.registers.set_program_counter(target);

        3
    }

    pub(crate) fn multiply(
        &mut self,
        accumulate: bool,
        set_flags: bool,
        rd: u32,
        rn: u32,
        rs: u32,
        rm: u32,
    ) -> u32 {
        let rm_value = self.registers.read_reg(rm as usize);
        let rs_value = self.registers.read_reg(rs as usize);

        let mut result = rm_value.wrapping_mul(rs_value);
        if accumulate {
            result = result.wrapping_add(self.registers.read_reg(rn as usize));
        }

        self.registers.write_reg(rd as usize, result);

        // C and V are left unpredictable by the hardware; they stay as-is.
        if set_flags {
            self.registers.cpsr.set_zero_flag(result == 0);
            self.registers.cpsr.set_sign_flag(result.get_bit(31));
        }

        4
    }

    pub(crate) fn multiply_long(
        &mut self,
        variant: MultiplyLongVariant,
        set_flags: bool,
        rdhi: u32,
        rdlo: u32,
        rs: u32,
        rm: u32,
    ) -> u32 {
        let rm_value = self.registers.read_reg(rm as usize);
        let rs_value = self.registers.read_reg(rs as usize);

        let accumulator = ((self.registers.read_reg(rdhi as usize) as u64) << 32)
            | self.registers.read_reg(rdlo as usize) as u64;

        let result = match variant {
            MultiplyLongVariant::Umull => (rm_value as u64).wrapping_mul(rs_value as u64),
            MultiplyLongVariant::Umlal => (rm_value as u64)
                .wrapping_mul(rs_value as u64)
                .wrapping_add(accumulator),
            MultiplyLongVariant::Smull => {
                (rm_value as i32 as i64).wrapping_mul(rs_value as i32 as i64) as u64
            }
            MultiplyLongVariant::Smlal => (rm_value as i32 as i64)
                .wrapping_mul(rs_value as i32 as i64)
                .wrapping_add(accumulator as i64) as u64,
        };

        self.registers.write_reg(rdlo as usize, result as u32);
        self.registers
            .write_reg(rdhi as usize, (result >> 32) as u32);

        if set_flags {
            self.registers.cpsr.set_zero_flag(result == 0);
            self.registers.cpsr.set_sign_flag((result >> 63) & 1 == 1);
        }

        5
    }

    pub(crate) fn undefined_instruction(&mut self) -> u32 {
        logger::log(format!(
            "undefined instruction at PC 0x{:08X}, halting",
            self.registers.program_counter().wrapping_sub(8)
        ));
        self.halt();

        1
    }
}
