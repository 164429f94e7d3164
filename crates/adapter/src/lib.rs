//! Controller link adapter.
//!
//! Everything that touches the serial device lives here. The rest of the
//! workspace is pure: it validates, translates and encodes, and hands finished
//! frames to a [`Transport`].
//!
//! # Link Overview
//!
//! 1. **Open**: the serial device is opened at 8N1 (default 115200 baud) and
//!    the firmware gets [`LinkConfig::settle`] to come out of reset
//! 2. **Center**: a neutral frame is written so no stale input is held
//! 3. **Drive**: every action is a pressed frame, a hold, a neutral frame and
//!    a release pause
//! 4. **Close**: dropping the transport closes the port
//!
//! Each frame is the raw 8-byte controller report; see
//! [`puyo_gc_frame`](crate::frame) for the layout. Nothing is read back.
//!
//! # Example
//!
//! ```no_run
//! use puyo_gc_adapter::{LinkConfig, Transport};
//! use puyo_gc_adapter::types::Button;
//!
//! let config = LinkConfig::from_env();
//! let mut transport = Transport::open(&config)?;
//! transport.press(Button::Start)?;
//! transport.place(0, 3)?;
//! # Ok::<(), puyo_gc_adapter::TransportError>(())
//! ```

pub mod config;
pub mod serial;
pub mod transport;

pub use puyo_gc_engine as engine;
pub use puyo_gc_frame as frame;
pub use puyo_gc_types as types;

pub use config::{ConfigError, LinkConfig, Timing};
pub use serial::{list_ports, open_port};
pub use transport::{Delay, ThreadDelay, Transport, TransportError};
