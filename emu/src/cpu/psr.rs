//! # Program Status Registers (CPSR and SPSR)
//!
//! ```text
//! 31 30 29 28 27      8 7 6 5 4   0
//! ┌──┬──┬──┬──┬────────┬─┬─┬─┬─────┐
//! │N │Z │C │V │Reserved│I│F│T│Mode │
//! └──┴──┴──┴──┴────────┴─┴─┴─┴─────┘
//! ```
//!
//! - **Flags (28-31)**: tested by [`Psr::can_execute`]
//! - **I/F bits (6-7)**: IRQ/FIQ disable
//! - **T bit (5)**: ARM (0) or Thumb (1) state
//! - **Mode (0-4)**: operating mode, see `cpu_modes`
//!
//! Bit 4 of the mode field always reads as 1, regardless of what was
//! written; `mode()` and the register file's CPSR read both honor that.

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::arm::alu_instruction::ArithmeticOpResult;
use crate::cpu::{condition::Condition, cpu_modes::Mode};

/// Program Status Register (CPSR or SPSR).
///
/// Wraps a raw `u32` and provides type-safe accessors for each field. Used
/// for both the current and the saved (banked) status registers.
#[derive(Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psr(u32);

impl Psr {
    pub(crate) fn can_execute(self, cond: Condition) -> bool {
        use Condition::{AL, CC, CS, EQ, GE, GT, HI, LE, LS, LT, MI, NE, NV, PL, VC, VS};
        match cond {
            EQ => self.zero_flag(),
            NE => !self.zero_flag(),
            CS => self.carry_flag(),
            CC => !self.carry_flag(),
            MI => self.sign_flag(),
            PL => !self.sign_flag(),
            VS => self.overflow_flag(),
            VC => !self.overflow_flag(),
            HI => self.carry_flag() && !self.zero_flag(),
            LS => !self.carry_flag() || self.zero_flag(),
            GE => self.sign_flag() == self.overflow_flag(),
            LT => self.sign_flag() != self.overflow_flag(),
            GT => !self.zero_flag() && (self.sign_flag() == self.overflow_flag()),
            LE => self.zero_flag() || (self.sign_flag() != self.overflow_flag()),
            AL => true,
            NV => false,
        }
    }

    /// N => Bit 31, (0=Not Signed, 1=Signed)
    #[must_use]
    pub fn sign_flag(self) -> bool {
        self.0.get_bit(31)
    }

    /// Z => Bit 30, (0=Not Zero, 1=Zero)
    #[must_use]
    pub fn zero_flag(self) -> bool {
        self.0.get_bit(30)
    }

    /// C => Bit 29, (0=Borrow/No Carry, 1=Carry/No Borrow)
    #[must_use]
    pub fn carry_flag(self) -> bool {
        self.0.get_bit(29)
    }

    /// V => Bit 28, (0=No Overflow, 1=Overflow)
    #[must_use]
    pub fn overflow_flag(self) -> bool {
        self.0.get_bit(28)
    }

    /// I => Bit 7, (0=Enable, 1=Disable)
    #[must_use]
    pub fn irq_disable(self) -> bool {
        self.0.get_bit(7)
    }

    /// F => Bit 6, (0=Enable, 1=Disable)
    #[must_use]
    pub fn fiq_disable(self) -> bool {
        self.0.get_bit(6)
    }

    /// T => Bit 5, (0=ARM, 1=THUMB)
    #[must_use]
    pub fn state_bit(self) -> bool {
        self.0.get_bit(5)
    }

    /// M4-M0 => Bits 4-0, with bit 4 forced to 1 on read.
    ///
    /// NOTE: the BIOS sometimes writes invalid mode values (like 0) to the
    /// SPSR. Invalid bits fall back to Supervisor.
    #[must_use]
    pub fn mode(self) -> Mode {
        let mode_bits = (self.0 & 0b11111) | (1 << 4);
        Mode::try_from(mode_bits).unwrap_or_else(|_| {
            tracing::debug!(
                "invalid mode bits 0b{:05b} in PSR=0x{:08X}, defaulting to Supervisor",
                mode_bits,
                self.0
            );
            Mode::Supervisor
        })
    }

    /// The raw 32-bit value, exactly as written.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn set_sign_flag(&mut self, value: bool) {
        self.0.set_bit(31, value);
    }

    pub fn set_zero_flag(&mut self, value: bool) {
        self.0.set_bit(30, value);
    }

    pub fn set_carry_flag(&mut self, value: bool) {
        self.0.set_bit(29, value);
    }

    pub fn set_overflow_flag(&mut self, value: bool) {
        self.0.set_bit(28, value);
    }

    pub fn set_flags(&mut self, op_result: ArithmeticOpResult) {
        self.set_sign_flag(op_result.sign);
        self.set_zero_flag(op_result.zero);
        self.set_carry_flag(op_result.carry);
        self.set_overflow_flag(op_result.overflow);
    }

    /// The interrupt bit I disables IRQ interrupts when set.
    pub fn set_irq_disable(&mut self, value: bool) {
        self.0.set_bit(7, value);
    }

    /// The interrupt bit F disables FIQ interrupts when set.
    pub fn set_fiq_disable(&mut self, value: bool) {
        self.0.set_bit(6, value);
    }

    /// The T bit selects the current instruction set (0=ARM, 1=THUMB).
    pub fn set_state_bit(&mut self, value: bool) {
        self.0.set_bit(5, value);
    }

    /// Overwrites the mode bits without validating them. The BIOS sometimes
    /// stores 0 into an SPSR; those bits must round-trip as written.
    pub const fn set_mode_raw(&mut self, m: u32) {
        self.0 = (self.0 & !0b11111) | (m & 0b11111);
    }

    /// The mode bits M4-M0 contain the current operating mode.
    pub const fn set_mode(&mut self, m: Mode) {
        self.0 = (self.0 & !0b11111) | m as u32;
    }

    #[must_use]
    pub fn cpu_state(self) -> CpuState {
        self.state_bit().into()
    }

    pub fn set_cpu_state(&mut self, state: CpuState) {
        self.set_state_bit(state.into());
    }
}

impl From<Mode> for Psr {
    fn from(m: Mode) -> Self {
        let mut s = Self(0);
        s.set_mode(m);

        s
    }
}

impl From<u32> for Psr {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Psr> for u32 {
    fn from(p: Psr) -> Self {
        p.0
    }
}

impl std::fmt::Debug for Psr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Psr({:#010X})", self.0)
    }
}

/// The CPU execution state (ARM or Thumb), controlled by the T bit.
/// Switched via `BX Rn`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CpuState {
    /// Thumb: 16-bit instructions.
    Thumb,
    /// ARM: 32-bit instructions.
    Arm,
}

impl From<CpuState> for bool {
    fn from(state: CpuState) -> Self {
        match state {
            CpuState::Arm => false,
            CpuState::Thumb => true,
        }
    }
}

impl From<bool> for CpuState {
    fn from(state: bool) -> Self {
        if state {
            Self::Thumb
        } else {
            Self::Arm
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_sign_flag() {
        let mut cpsr = Psr(0);
        cpsr.set_sign_flag(true);
        assert!(cpsr.sign_flag());
    }

    #[test]
    fn check_zero_flag() {
        let mut cpsr = Psr(0);
        cpsr.set_zero_flag(true);
        assert!(cpsr.zero_flag());
    }

    #[test]
    fn check_carry_flag() {
        let mut cpsr = Psr(0);
        cpsr.set_carry_flag(true);
        assert!(cpsr.carry_flag());
    }

    #[test]
    fn check_overflow_flag() {
        let cpsr = Psr(0b0001_0000_0000_0000_0000_0000_0000_0000);
        assert!(cpsr.overflow_flag());
    }

    #[test]
    fn check_irq_disable() {
        let mut cpsr = Psr(0);
        cpsr.set_irq_disable(true);
        assert!(cpsr.irq_disable());
    }

    #[test]
    fn check_fiq_disable() {
        let mut cpsr = Psr(0);
        cpsr.set_fiq_disable(true);
        assert!(cpsr.fiq_disable());
    }

    #[test]
    fn check_state_bit() {
        let mut cpsr = Psr(0);
        cpsr.set_state_bit(true);
        assert!(cpsr.state_bit());
        assert_eq!(cpsr.cpu_state(), CpuState::Thumb);
    }

    #[test]
    fn mode_round_trips() {
        for mode in [
            Mode::User,
            Mode::Fiq,
            Mode::Irq,
            Mode::Supervisor,
            Mode::Abort,
            Mode::Undefined,
            Mode::System,
        ] {
            let mut cpsr = Psr(0);
            cpsr.set_mode(mode);
            assert_eq!(cpsr.value() & 0b11111, mode as u32);
            assert_eq!(cpsr.mode(), mode);
        }
    }

    #[test]
    fn mode_bit_4_is_forced_on_read() {
        // Mode bits 0b00000 read back as User (0b10000).
        let cpsr = Psr(0);
        assert_eq!(cpsr.mode(), Mode::User);

        // 0b00011 reads as 0b10011 = Supervisor.
        let cpsr = Psr(0b00011);
        assert_eq!(cpsr.mode(), Mode::Supervisor);
    }

    #[test]
    fn set_mode_raw_keeps_invalid_bits() {
        let mut spsr = Psr(0xF000_0000);
        spsr.set_mode_raw(0);
        assert_eq!(spsr.value(), 0xF000_0000);
    }

    #[test]
    fn condition_table() {
        let mut psr = Psr(0);

        assert!(psr.can_execute(Condition::AL));
        assert!(!psr.can_execute(Condition::NV));
        assert!(!psr.can_execute(Condition::EQ));
        assert!(psr.can_execute(Condition::NE));

        psr.set_zero_flag(true);
        assert!(psr.can_execute(Condition::EQ));
        assert!(psr.can_execute(Condition::LS));
        assert!(!psr.can_execute(Condition::HI));

        // N != V => LT
        psr.set_sign_flag(true);
        assert!(psr.can_execute(Condition::LT));
        assert!(psr.can_execute(Condition::LE));
        assert!(!psr.can_execute(Condition::GE));
        assert!(!psr.can_execute(Condition::GT));

        // N == V, Z clear => GT
        psr.set_overflow_flag(true);
        psr.set_zero_flag(false);
        assert!(psr.can_execute(Condition::GE));
        assert!(psr.can_execute(Condition::GT));
        assert!(!psr.can_execute(Condition::LT));
        assert!(!psr.can_execute(Condition::LE));
    }
}
