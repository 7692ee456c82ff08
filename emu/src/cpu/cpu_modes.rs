//! # ARM7TDMI CPU Operating Modes
//!
//! The processor has seven operating modes, encoded in bits 4-0 of the CPSR:
//!
//! ```text
//! ┌─────────────┬──────────┬───────────────────────────────────────────────┐
//! │    Mode     │  Binary  │                  Purpose                      │
//! ├─────────────┼──────────┼───────────────────────────────────────────────┤
//! │ User        │  10000   │ Normal program execution (unprivileged)       │
//! │ FIQ         │  10001   │ Fast interrupt handling                       │
//! │ IRQ         │  10010   │ General interrupt handling                    │
//! │ Supervisor  │  10011   │ Protected mode for the BIOS (SWI)             │
//! │ Abort       │  10111   │ Memory access failures                        │
//! │ Undefined   │  11011   │ Undefined instruction handling                │
//! │ System      │  11111   │ Privileged mode sharing User registers        │
//! └─────────────┴──────────┴───────────────────────────────────────────────┘
//! ```
//!
//! Each exception mode has a private SP/LR pair (FIQ additionally banks
//! R8-R12) and its own SPSR; User and System share the main bank and have no
//! SPSR. See `registers` for how banking is resolved.

use serde::{Deserialize, Serialize};

/// The CPU operating mode, stored in bits 0-4 of the CPSR/SPSR.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Mode {
    /// Normal program execution state (unprivileged). This is where games
    /// run; it cannot change CPU mode or interrupt masks.
    User = 0b10000,

    /// Fast Interrupt Request mode. Has the most banked registers (R8-R14)
    /// for minimal context-save overhead. Not typically used on the GBA
    /// since there is no external FIQ source.
    Fiq = 0b10001,

    /// Interrupt Request mode. Entered on VBlank/HBlank/timer interrupts,
    /// the most common exception mode used by games.
    Irq = 0b10010,

    /// Supervisor mode (privileged). Entered via Reset or the SWI
    /// instruction; the BIOS runs here.
    Supervisor = 0b10011,

    /// Abort mode. Entered after a failed memory access; on the GBA this
    /// usually indicates a bug since there is no virtual memory.
    Abort = 0b10111,

    /// Undefined instruction mode.
    Undefined = 0b11011,

    /// System mode: privileged, but shares the User registers (no banked
    /// SP/LR, no SPSR).
    System = 0b11111,
}

impl From<Mode> for u32 {
    fn from(m: Mode) -> Self {
        m as Self
    }
}

impl TryFrom<u32> for Mode {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            0b10000 => Ok(Self::User),
            0b10001 => Ok(Self::Fiq),
            0b10010 => Ok(Self::Irq),
            0b10011 => Ok(Self::Supervisor),
            0b10111 => Ok(Self::Abort),
            0b11011 => Ok(Self::Undefined),
            0b11111 => Ok(Self::System),
            _ => Err(String::from("Unexpected value for Mode")),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Fiq => f.write_str("fiq"),
            Self::Irq => f.write_str("irq"),
            Self::Supervisor => f.write_str("supervisor"),
            Self::Abort => f.write_str("abort"),
            Self::Undefined => f.write_str("undefined"),
            Self::System => f.write_str("system"),
        }
    }
}
