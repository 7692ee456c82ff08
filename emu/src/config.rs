//! Recognized driver options. Parsing command-line flags is the host's
//! business; the core only consumes this struct.

/// Options the driver accepts. A host frontend typically fills this from
/// its own flag parser or from [`Config::from_env`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the 16 KiB BIOS image; empty selects the no-BIOS boot path.
    pub bios_path: String,
    /// Path to the cartridge image.
    pub rom_path: String,
    /// Host-side upscale factor, at least 1.0.
    pub scale: f64,
    /// Dump R0..R15 and CPSR before each instruction.
    pub trace_registers: bool,
    /// Verbose instruction-level trace.
    pub debug: bool,
    /// Host-side fullscreen request; unused by the core.
    pub fullscreen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bios_path: String::new(),
            rom_path: String::new(),
            scale: 2.0,
            trace_registers: false,
            debug: false,
            fullscreen: false,
        }
    }
}

impl Config {
    /// Reads the recognized options from the environment: `BIOS_PATH`,
    /// `ROM_PATH`, `SCALE`, `TRACE_REGISTERS`, `DEBUG`, `FULLSCREEN`.
    /// Unset or unparsable values keep their defaults; a scale below 1.0
    /// clamps to 1.0.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let scale = std::env::var("SCALE")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .map_or(defaults.scale, |s| s.max(1.0));

        let set = |name: &str| std::env::var(name).is_ok_and(|v| !v.is_empty());

        Self {
            bios_path: std::env::var("BIOS_PATH").unwrap_or_default(),
            rom_path: std::env::var("ROM_PATH").unwrap_or_default(),
            scale,
            trace_registers: set("TRACE_REGISTERS"),
            debug: set("DEBUG"),
            fullscreen: set("FULLSCREEN"),
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "bios-path: {}", self.bios_path)?;
        writeln!(f, "rom-path: {}", self.rom_path)?;
        writeln!(f, "scale: {:.2}", self.scale)?;
        writeln!(f, "trace-registers: {}", self.trace_registers)?;
        writeln!(f, "debug: {}", self.debug)?;
        write!(f, "fullscreen: {}", self.fullscreen)
    }
}
