//! Backing storage and routing for the sixteen logical memory regions.
//!
//! # Memory Map
//!
//! | Region       | Address Range           | Size   | Notes                             |
//! |--------------|-------------------------|--------|-----------------------------------|
//! | BIOS         | `0x0000_0000-0000_3FFF` | 16 KB  | Read-only                         |
//! | EWRAM        | `0x0200_0000-0203_FFFF` | 256 KB | Mirrored up to `0x02FF_FFFF`      |
//! | IWRAM        | `0x0300_0000-0300_7FFF` | 32 KB  | Mirrored up to `0x03FF_FFFF`      |
//! | I/O          | `0x0400_0000-0400_03FF` | 1 KB   |                                   |
//! | Palette RAM  | `0x0500_0000-0500_03FF` | 1 KB   | Mirrored up to `0x05FF_FFFF`      |
//! | VRAM         | `0x0600_0000-0601_7FFF` | 96 KB  | Mirrored; rejects byte writes     |
//! | OAM          | `0x0700_0000-0700_03FF` | 1 KB   | Mirrored up to `0x07FF_FFFF`      |
//! | Game Pak ROM | `0x0800_0000-0DFF_FFFF` | 32 MB  | Read-only; WS1/WS2 alias WS0      |
//! | Game Pak SRAM| `0x0E00_0000-0E00_FFFF` | 64 KB  | Mirrored up to `0x0FFF_FFFF`      |
//!
//! Everything else (`0x0000_4000-0x01FF_FFFF`, the upper I/O hole,
//! `0x1000_0000` and above) is unmapped: reads return 0, writes are dropped.
//!
//! # Access widths
//!
//! Misaligned 32-bit reads return the aligned word rotated right by
//! `8 * (addr & 3)`; 16-bit reads at odd addresses return the aligned
//! halfword rotated right by 8. Wide writes silently align. Byte writes
//! into VRAM are dropped: the 16-bit video bus has no byte enable.

use serde::{Deserialize, Serialize};

/// BIOS image size, exactly 16 KiB.
pub const BIOS_SIZE: usize = 0x4000;
/// On-board work RAM, 256 KiB.
pub const EWRAM_SIZE: usize = 0x4_0000;
/// On-chip work RAM, 32 KiB.
pub const IWRAM_SIZE: usize = 0x8000;
/// I/O register file, 1 KiB.
pub const IO_SIZE: usize = 0x400;
/// Palette RAM, 1 KiB.
pub const PALETTE_SIZE: usize = 0x400;
/// Video RAM, 96 KiB.
pub const VRAM_SIZE: usize = 0x1_8000;
/// Object attribute memory, 1 KiB.
pub const OAM_SIZE: usize = 0x400;
/// Largest cartridge image, 32 MiB.
pub const ROM_MAX_SIZE: usize = 0x200_0000;
/// Cartridge SRAM, 64 KiB.
pub const SRAM_SIZE: usize = 0x1_0000;

/// A BIOS or cartridge image with an unusable size. Fatal at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// The BIOS must be exactly 16 KiB.
    BiosSize(usize),
    /// The cartridge image exceeds 32 MiB.
    RomSize(usize),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BiosSize(size) => {
                write!(f, "BIOS image is {size} bytes, expected {BIOS_SIZE}")
            }
            Self::RomSize(size) => {
                write!(f, "ROM image is {size} bytes, maximum is {ROM_MAX_SIZE}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Owns the byte arrays behind every mapped region and routes 8/16/32-bit
/// accesses to them. All operations are total: no address can fail.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressSpace {
    bios: Vec<u8>,
    ewram: Vec<u8>,
    iwram: Vec<u8>,
    pub(crate) io: Vec<u8>,
    pub(crate) palette: Vec<u8>,
    pub(crate) vram: Vec<u8>,
    oam: Vec<u8>,
    pub(crate) rom: Vec<u8>,
    sram: Vec<u8>,
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self {
            bios: vec![0; BIOS_SIZE],
            ewram: vec![0; EWRAM_SIZE],
            iwram: vec![0; IWRAM_SIZE],
            io: vec![0; IO_SIZE],
            palette: vec![0; PALETTE_SIZE],
            vram: vec![0; VRAM_SIZE],
            oam: vec![0; OAM_SIZE],
            rom: Vec::new(),
            sram: vec![0; SRAM_SIZE],
        }
    }
}

impl AddressSpace {
    /// Builds the address space around the given images, validating their
    /// sizes. The BIOS region stays zeroed when no image is given.
    pub fn new(bios: Option<&[u8]>, rom: &[u8]) -> Result<Self, LoadError> {
        if let Some(bios) = bios {
            if bios.len() != BIOS_SIZE {
                return Err(LoadError::BiosSize(bios.len()));
            }
        }
        if rom.len() > ROM_MAX_SIZE {
            return Err(LoadError::RomSize(rom.len()));
        }

        let mut space = Self::default();
        if let Some(bios) = bios {
            space.bios.copy_from_slice(bios);
        }
        space.rom = rom.to_vec();

        Ok(space)
    }

    #[must_use]
    pub fn read8(&self, address: u32) -> u8 {
        let index = address as usize;
        match address {
            0x0000_0000..=0x0000_3FFF => self.bios[index],
            0x0200_0000..=0x02FF_FFFF => self.ewram[(index - 0x0200_0000) % EWRAM_SIZE],
            0x0300_0000..=0x03FF_FFFF => self.iwram[(index - 0x0300_0000) % IWRAM_SIZE],
            0x0400_0000..=0x0400_03FF => self.io[index - 0x0400_0000],
            0x0500_0000..=0x05FF_FFFF => self.palette[(index - 0x0500_0000) % PALETTE_SIZE],
            0x0600_0000..=0x06FF_FFFF => self.vram[(index - 0x0600_0000) % VRAM_SIZE],
            0x0700_0000..=0x07FF_FFFF => self.oam[(index - 0x0700_0000) % OAM_SIZE],
            // The three wait-state windows alias the same cartridge image;
            // reads past its end see an empty bus.
            0x0800_0000..=0x0DFF_FFFF => self.rom.get(index & 0x01FF_FFFF).copied().unwrap_or(0),
            0x0E00_0000..=0x0FFF_FFFF => self.sram[(index - 0x0E00_0000) % SRAM_SIZE],
            _ => 0,
        }
    }

    /// Reads a halfword. An odd address returns the aligned halfword
    /// rotated right by 8.
    #[must_use]
    pub fn read16(&self, address: u32) -> u16 {
        let aligned = address & !0b1;
        let halfword = u16::from_le_bytes([self.read8(aligned), self.read8(aligned + 1)]);

        if address & 0b1 == 1 {
            halfword.rotate_right(8)
        } else {
            halfword
        }
    }

    /// Reads a word. A misaligned address returns the aligned word rotated
    /// right by `8 * (address & 3)`.
    #[must_use]
    pub fn read32(&self, address: u32) -> u32 {
        let aligned = address & !0b11;
        let word = u32::from_le_bytes([
            self.read8(aligned),
            self.read8(aligned + 1),
            self.read8(aligned + 2),
            self.read8(aligned + 3),
        ]);

        word.rotate_right(8 * (address & 0b11))
    }

    /// Writes one byte. Writes into VRAM are dropped (the video bus has no
    /// byte enable); read-only and unmapped regions swallow the write.
    pub fn write8(&mut self, address: u32, value: u8) {
        if let 0x0600_0000..=0x06FF_FFFF = address {
            tracing::debug!("byte write to VRAM at 0x{address:08X} dropped");
            return;
        }

        self.store8(address, value);
    }

    /// Writes a halfword, silently aligned to a halfword boundary.
    pub fn write16(&mut self, address: u32, value: u16) {
        let aligned = address & !0b1;
        let bytes = value.to_le_bytes();
        self.store8(aligned, bytes[0]);
        self.store8(aligned + 1, bytes[1]);
    }

    /// Writes a word, silently aligned to a word boundary.
    pub fn write32(&mut self, address: u32, value: u32) {
        let aligned = address & !0b11;
        let bytes = value.to_le_bytes();
        self.store8(aligned, bytes[0]);
        self.store8(aligned + 1, bytes[1]);
        self.store8(aligned + 2, bytes[2]);
        self.store8(aligned + 3, bytes[3]);
    }

    /// Region-level byte store, shared by every write width.
    fn store8(&mut self, address: u32, value: u8) {
        let index = address as usize;
        match address {
            0x0200_0000..=0x02FF_FFFF => {
                self.ewram[(index - 0x0200_0000) % EWRAM_SIZE] = value;
            }
            0x0300_0000..=0x03FF_FFFF => {
                self.iwram[(index - 0x0300_0000) % IWRAM_SIZE] = value;
            }
            0x0400_0000..=0x0400_03FF => self.io[index - 0x0400_0000] = value,
            0x0500_0000..=0x05FF_FFFF => {
                self.palette[(index - 0x0500_0000) % PALETTE_SIZE] = value;
            }
            0x0600_0000..=0x06FF_FFFF => {
                self.vram[(index - 0x0600_0000) % VRAM_SIZE] = value;
            }
            0x0700_0000..=0x07FF_FFFF => self.oam[(index - 0x0700_0000) % OAM_SIZE] = value,
            0x0E00_0000..=0x0FFF_FFFF => {
                self.sram[(index - 0x0E00_0000) % SRAM_SIZE] = value;
            }
            0x0000_0000..=0x0000_3FFF | 0x0800_0000..=0x0DFF_FFFF => {
                tracing::debug!("write to read-only region at 0x{address:08X} dropped");
            }
            _ => {
                tracing::debug!("write to unmapped address 0x{address:08X} dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ewram_mirrors_every_256k() {
        use rand::Rng;

        let mut space = AddressSpace::default();
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let address = rng.gen_range(0x0200_0000u32..=0x02FF_FFFC) & !0b11;
            let value: u32 = rng.gen();

            space.write32(address, value);
            let canonical = 0x0200_0000 + (address % 0x4_0000);
            assert_eq!(space.read32(canonical), value);
        }
    }

    #[test]
    fn iwram_mirrors_every_32k() {
        let mut space = AddressSpace::default();
        space.write8(0x0300_21FF, 5);

        assert_eq!(space.read8(0x0300_21FF), 5);
        assert_eq!(space.read8(0x0300_A1FF), 5);
        assert_eq!(space.read8(0x03FF_A1FF), 5);

        space.write8(0x03FF_F1FF, 7);
        assert_eq!(space.read8(0x0300_71FF), 7);
    }

    #[test]
    fn palette_oam_and_sram_mirror() {
        let mut space = AddressSpace::default();

        space.write16(0x0500_0000, 0x1234);
        assert_eq!(space.read16(0x0500_0400), 0x1234);
        assert_eq!(space.read16(0x05FF_FC00), 0x1234);

        space.write16(0x0700_0010, 0xABCD);
        assert_eq!(space.read16(0x0700_0410), 0xABCD);

        space.write8(0x0E00_0001, 0x42);
        assert_eq!(space.read8(0x0E01_0001), 0x42);
        assert_eq!(space.read8(0x0FFF_0001), 0x42);
    }

    #[test]
    fn rom_wait_state_windows_alias() {
        let space = AddressSpace::new(None, &[1, 2, 3, 4]).unwrap();

        assert_eq!(space.read8(0x0800_0000), 1);
        assert_eq!(space.read8(0x0A00_0001), 2);
        assert_eq!(space.read8(0x0C00_0003), 4);

        // Reads past the loaded image return 0.
        assert_eq!(space.read32(0x0800_0004), 0);
        assert_eq!(space.read8(0x0DFF_FFFF), 0);
    }

    #[test]
    fn rom_and_bios_are_read_only() {
        let mut space = AddressSpace::new(None, &[1, 2, 3, 4]).unwrap();

        space.write32(0x0800_0000, 0xDEAD_BEEF);
        assert_eq!(space.read32(0x0800_0000), 0x0403_0201);

        space.write8(0x0000_0100, 0xFF);
        assert_eq!(space.read8(0x0000_0100), 0);
    }

    #[test]
    fn unmapped_reads_zero_and_writes_drop() {
        let mut space = AddressSpace::default();

        space.write32(0x0000_4000, 0xFFFF_FFFF);
        assert_eq!(space.read32(0x0000_4000), 0);

        space.write32(0x1000_0000, 0xFFFF_FFFF);
        assert_eq!(space.read32(0x1000_0000), 0);

        // The I/O hole above 0x0400_03FF is unmapped too.
        space.write32(0x0400_0800, 0xFFFF_FFFF);
        assert_eq!(space.read32(0x0400_0800), 0);
    }

    #[test]
    fn misaligned_word_reads_rotate() {
        let mut space = AddressSpace::default();
        space.write32(0x0200_0000, 0xDDCC_BBAA);

        assert_eq!(space.read32(0x0200_0000), 0xDDCC_BBAA);
        assert_eq!(space.read32(0x0200_0001), 0xAADD_CCBB);
        assert_eq!(space.read32(0x0200_0002), 0xBBAA_DDCC);
        assert_eq!(space.read32(0x0200_0003), 0xCCBB_AADD);
    }

    #[test]
    fn odd_halfword_reads_rotate() {
        let mut space = AddressSpace::default();
        space.write16(0x0300_0000, 0xBBAA);

        assert_eq!(space.read16(0x0300_0000), 0xBBAA);
        assert_eq!(space.read16(0x0300_0001), 0xAABB);
    }

    #[test]
    fn wide_writes_align_silently() {
        let mut space = AddressSpace::default();

        space.write32(0x0200_0002, 0x1122_3344);
        assert_eq!(space.read32(0x0200_0000), 0x1122_3344);

        space.write16(0x0300_0003, 0x5566);
        assert_eq!(space.read16(0x0300_0002), 0x5566);
    }

    #[test]
    fn vram_rejects_byte_writes_but_not_halfword_writes() {
        let mut space = AddressSpace::default();

        space.write8(0x0600_0000, 0xFF);
        assert_eq!(space.read8(0x0600_0000), 0);

        space.write16(0x0600_0000, 0x7FFF);
        assert_eq!(space.read16(0x0600_0000), 0x7FFF);

        space.write32(0x0600_0010, 0x7FFF_7FFF);
        assert_eq!(space.read32(0x0600_0010), 0x7FFF_7FFF);
    }

    #[test]
    fn vram_mirrors_every_96k() {
        let mut space = AddressSpace::default();

        space.write16(0x0600_0000, 0x1234);
        assert_eq!(space.read16(0x0601_8000), 0x1234);
    }

    #[test]
    fn image_sizes_are_validated() {
        assert_eq!(
            AddressSpace::new(Some(&[0u8; 100]), &[]).unwrap_err(),
            LoadError::BiosSize(100)
        );

        let oversized = vec![0u8; ROM_MAX_SIZE + 1];
        assert_eq!(
            AddressSpace::new(None, &oversized).unwrap_err(),
            LoadError::RomSize(ROM_MAX_SIZE + 1)
        );

        assert!(AddressSpace::new(Some(&[0u8; BIOS_SIZE]), &[0u8; 16]).is_ok());
    }
}
