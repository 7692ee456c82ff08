//! The GBA address space: backing storage for every memory region, with
//! mirroring, access-width rules and read-only enforcement.

pub mod address_space;
pub mod io_registers;

pub use address_space::{AddressSpace, LoadError};
