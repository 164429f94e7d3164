//! Link configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then whatever the caller overrides last.
//!
//! # Environment Variables
//!
//! - `PUYO_GC_DEVICE`: serial device path (default: "/dev/ttyACM0")
//! - `PUYO_GC_BAUD`: baud rate (default: 115200)
//! - `PUYO_GC_COLUMNS`: board columns (default: 6)
//! - `PUYO_GC_SPAWN_COLUMN`: spawn column (default: 2)
//!
//! # File Format
//!
//! ```toml
//! device = "/dev/ttyUSB0"
//! baud_rate = 115200
//!
//! [timing]
//! tap_ms = 34
//! hold_ms = 80
//!
//! [geometry]
//! columns = 6
//! spawn_column = 2
//!
//! [controls]
//! rotate_cw = "a"
//! rotate_ccw = "b"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::Controls;
use crate::types::{BoardGeometry, COMMAND_GAP_MS, HOLD_MS, RELEASE_MS, TAP_MS};

/// Default serial device of an Arduino Uno/Leonardo on Linux
pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";

/// Default link speed
pub const DEFAULT_BAUD: u32 = 115200;

/// Time the Arduino needs to come back up after the port open resets it
pub const DEFAULT_SETTLE_MS: u64 = 2000;

pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Frame hold durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pressed-frame hold of a repositioning tap
    pub tap: Duration,
    /// Pressed-frame hold of a button command or drop
    pub hold: Duration,
    /// Neutral-frame hold after every action
    pub release: Duration,
    /// Pause between consecutive commands
    pub command_gap: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tap: Duration::from_millis(TAP_MS),
            hold: Duration::from_millis(HOLD_MS),
            release: Duration::from_millis(RELEASE_MS),
            command_gap: Duration::from_millis(COMMAND_GAP_MS),
        }
    }
}

/// Everything needed to open the link and drive the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Serial device path (e.g. /dev/ttyACM0, /dev/ttyUSB0)
    pub device: String,
    pub baud_rate: u32,
    pub write_timeout: Duration,
    /// Wait after opening before the first frame
    pub settle: Duration,
    pub timing: Timing,
    pub geometry: BoardGeometry,
    pub controls: Controls,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            baud_rate: DEFAULT_BAUD,
            write_timeout: Duration::from_millis(DEFAULT_WRITE_TIMEOUT_MS),
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            timing: Timing::default(),
            geometry: BoardGeometry::default(),
            controls: Controls::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    device: Option<String>,
    baud_rate: Option<u32>,
    write_timeout_ms: Option<u64>,
    settle_ms: Option<u64>,
    timing: TimingFile,
    geometry: Option<BoardGeometry>,
    controls: Option<Controls>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TimingFile {
    tap_ms: Option<u64>,
    hold_ms: Option<u64>,
    release_ms: Option<u64>,
    command_gap_ms: Option<u64>,
}

impl LinkConfig {
    pub fn new(device: &str) -> Self {
        Self {
            device: device.to_string(),
            ..Default::default()
        }
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Defaults overlaid with a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(Self::default().merge(file))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(device) = file.device {
            self.device = device;
        }
        if let Some(baud) = file.baud_rate {
            self.baud_rate = baud;
        }
        if let Some(ms) = file.write_timeout_ms {
            self.write_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = file.settle_ms {
            self.settle = Duration::from_millis(ms);
        }
        let t = file.timing;
        if let Some(ms) = t.tap_ms {
            self.timing.tap = Duration::from_millis(ms);
        }
        if let Some(ms) = t.hold_ms {
            self.timing.hold = Duration::from_millis(ms);
        }
        if let Some(ms) = t.release_ms {
            self.timing.release = Duration::from_millis(ms);
        }
        if let Some(ms) = t.command_gap_ms {
            self.timing.command_gap = Duration::from_millis(ms);
        }
        if let Some(geometry) = file.geometry {
            self.geometry = geometry;
        }
        if let Some(controls) = file.controls {
            self.controls = controls;
        }
        self
    }

    /// Overlay `PUYO_GC_*` environment variables. Unparseable values are ignored.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    pub fn with_env_from(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(device) = get("PUYO_GC_DEVICE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            self.device = device;
        }
        if let Some(baud) = get("PUYO_GC_BAUD").and_then(|s| s.trim().parse().ok()) {
            self.baud_rate = baud;
        }
        if let Some(columns) = get("PUYO_GC_COLUMNS").and_then(|s| s.trim().parse().ok()) {
            self.geometry.columns = columns;
        }
        if let Some(spawn) = get("PUYO_GC_SPAWN_COLUMN").and_then(|s| s.trim().parse().ok()) {
            self.geometry.spawn_column = spawn;
        }
        self
    }

    pub fn with_device(mut self, device: &str) -> Self {
        self.device = device.to_string();
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_geometry(mut self, geometry: BoardGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.trim().is_empty() {
            return Err(ConfigError::Invalid("device path is empty".to_string()));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::Invalid("baud rate must be positive".to_string()));
        }
        if !self.geometry.is_consistent() {
            return Err(ConfigError::Invalid(format!(
                "spawn column {} must lie inside 0..{} (columns must be 1..=127)",
                self.geometry.spawn_column, self.geometry.columns
            )));
        }
        if self.timing.tap > self.timing.hold {
            return Err(ConfigError::Invalid(format!(
                "tap hold {:?} is longer than button hold {:?}",
                self.timing.tap, self.timing.hold
            )));
        }
        Ok(())
    }
}
