//! Top-level GBA system: owns the CPU (which owns everything else) and
//! paces it against the host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cartridge_header::CartridgeHeader;
use crate::config::Config;
use crate::cpu::arm7tdmi::Arm7tdmi;
use crate::memory::{AddressSpace, LoadError};

/// The master clock, cycles per second. A host pacing itself against real
/// time divides by this.
pub const CYCLES_PER_SECOND: u32 = 16_777_216;

pub struct Gba {
    pub cpu: Arm7tdmi,
    pub cartridge_header: CartridgeHeader,

    /// Raised by the host to make the driver return after the current
    /// instruction.
    stop: Arc<AtomicBool>,
}

impl Gba {
    /// Assembles the system around the given images. The BIOS, when
    /// present, must be exactly 16 KiB; the cartridge at most 32 MiB.
    pub fn new(config: Config, bios: Option<Vec<u8>>, rom: Vec<u8>) -> Result<Self, LoadError> {
        let cartridge_header = CartridgeHeader::parse(&rom);
        tracing::info!(
            title = %cartridge_header.game_title,
            code = %cartridge_header.game_code,
            "cartridge loaded"
        );

        let bus = AddressSpace::new(bios.as_deref(), &rom)?;
        let cpu = Arm7tdmi::new(config, bus, bios.is_some());

        Ok(Self {
            cpu,
            cartridge_header,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Advances the whole machine by one CPU cycle.
    pub fn step(&mut self) {
        self.cpu.step();
    }

    /// Runs until the PPU latches a complete frame, renders it, and returns
    /// `true`. Returns `false` when the stop flag was raised or the CPU
    /// halted; the framebuffer then holds the previous frame.
    pub fn step_until_frame_ready(&mut self) -> bool {
        loop {
            if self.stop.load(Ordering::Relaxed) || self.cpu.is_halted() {
                return false;
            }

            self.cpu.step();

            if self.cpu.ppu.frame_ready() {
                self.cpu.ppu.clear_frame_ready();
                self.cpu.render_frame();
                return true;
            }
        }
    }

    /// The last rendered frame: RGBA, 240x160, 4 bytes per pixel.
    #[must_use]
    pub fn frame_buffer(&self) -> &[u8] {
        self.cpu.ppu.frame_buffer()
    }

    /// A handle the host can raise from its own loop to stop
    /// [`step_until_frame_ready`] cooperatively.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An idle-loop cartridge: `B .` at the entry point.
    fn idle_rom() -> Vec<u8> {
        0xEAFF_FFFEu32.to_le_bytes().to_vec()
    }

    #[test]
    fn produces_one_frame_per_280896_cycles() {
        let mut gba = Gba::new(Config::default(), None, idle_rom()).unwrap();

        assert!(gba.step_until_frame_ready());

        // From frame boundary to frame boundary: 308 * 228 * 4 cycles.
        let mut cycles = 0u32;
        loop {
            gba.step();
            cycles += 1;
            if gba.cpu.ppu.frame_ready() {
                gba.cpu.ppu.clear_frame_ready();
                break;
            }
        }
        assert_eq!(cycles, 280_896);
    }

    #[test]
    fn renders_mode3_on_frame_ready() {
        let mut gba = Gba::new(Config::default(), None, idle_rom()).unwrap();

        // Mode 3, full-white top-left pixel.
        gba.cpu.bus.write16(0x0400_0000, 3);
        gba.cpu.bus.write16(0x0600_0000, 0x7FFF);

        assert!(gba.step_until_frame_ready());
        assert_eq!(&gba.frame_buffer()[0..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn stop_flag_breaks_the_frame_loop() {
        let mut gba = Gba::new(Config::default(), None, idle_rom()).unwrap();

        gba.stop_handle().store(true, Ordering::Relaxed);
        assert!(!gba.step_until_frame_ready());
    }

    #[test]
    fn oversized_rom_is_rejected() {
        let rom = vec![0u8; 0x200_0001];
        assert!(Gba::new(Config::default(), None, rom).is_err());
    }
}
