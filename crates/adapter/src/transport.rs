//! Frame transport.
//!
//! [`Transport`] is the single writer on the controller link. Each action is
//! sent as a pressed frame, a hold delay, a neutral frame and a release
//! delay. Operations take `&mut self`, so a host sharing one transport across
//! threads has to put it behind a `Mutex`.
//!
//! A failed write aborts the rest of the current operation. Frames already
//! written have reached the console; nothing is rolled back or retried.

use std::io::Write;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use serialport::SerialPort;
use thiserror::Error;

use crate::config::{LinkConfig, Timing};
use crate::engine::{translate, Controls};
use crate::frame::{encode_action, ControllerFrame};
use crate::serial::open_port;
use crate::types::{
    BoardGeometry, Button, ControllerAction, HoldKind, Intent, Placement, TranslateError,
};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open serial device {path}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("serial write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// Blocking wait between frames.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// Owns the link and serializes every frame written to it.
pub struct Transport<W: Write, D: Delay = ThreadDelay> {
    link: W,
    delay: D,
    timing: Timing,
    geometry: BoardGeometry,
    controls: Controls,
    frames_sent: u64,
}

impl Transport<Box<dyn SerialPort>, ThreadDelay> {
    /// Open the serial device, wait for the firmware to settle and center the
    /// controller. The port closes when the transport is dropped.
    pub fn open(config: &LinkConfig) -> Result<Self, TransportError> {
        let port = open_port(config)?;
        info!(
            "opened {} at {} baud, settling {:?}",
            config.device, config.baud_rate, config.settle
        );
        let mut transport = Self::new(port, config);
        transport.delay.delay(config.settle);
        transport.release_all()?;
        Ok(transport)
    }
}

impl<W: Write> Transport<W, ThreadDelay> {
    pub fn new(link: W, config: &LinkConfig) -> Self {
        Self::with_delay(link, ThreadDelay, config)
    }
}

impl<W: Write, D: Delay> Transport<W, D> {
    pub fn with_delay(link: W, delay: D, config: &LinkConfig) -> Self {
        Self {
            link,
            delay,
            timing: config.timing,
            geometry: config.geometry,
            controls: config.controls,
            frames_sent: 0,
        }
    }

    pub fn link(&self) -> &W {
        &self.link
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn into_inner(self) -> W {
        self.link
    }

    /// Press and release `button` with the deliberate-press hold.
    pub fn press(&mut self, button: Button) -> Result<(), TransportError> {
        debug!("press {button}");
        self.send(&ControllerAction::hold(button))
            .inspect_err(|e| warn!("press {button} aborted: {e}"))
    }

    /// Walk the falling piece to `column`, rotate it and drop it.
    ///
    /// Inputs are expected to be validated already; anything the translator
    /// cannot represent comes back as [`TransportError::Translate`] before a
    /// single frame is written.
    pub fn place(&mut self, column: i8, rotation: i8) -> Result<(), TransportError> {
        let placement = Placement::new(column, rotation);
        let plan = translate(placement, &self.geometry, &self.controls)?;
        debug!("place {column},{rotation}: {} actions", plan.len());

        for (i, action) in plan.iter().enumerate() {
            if let Err(e) = self.send(action) {
                warn!(
                    "placement {column},{rotation} aborted after {i} of {} actions: {e}",
                    plan.len()
                );
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, intent: &Intent) -> Result<(), TransportError> {
        match intent {
            Intent::Button(button) => self.press(*button),
            Intent::Placement(p) => self.place(p.column, p.rotation),
        }
    }

    /// Write one neutral frame.
    pub fn release_all(&mut self) -> Result<(), TransportError> {
        self.write_frame(&ControllerFrame::NEUTRAL)
    }

    /// Pause between consecutive commands.
    pub fn command_gap(&mut self) {
        self.delay.delay(self.timing.command_gap);
    }

    fn send(&mut self, action: &ControllerAction) -> Result<(), TransportError> {
        let pair = encode_action(action);
        let hold = match action.hold {
            HoldKind::Tap => self.timing.tap,
            HoldKind::Hold => self.timing.hold,
        };

        self.write_frame(&pair.pressed)?;
        self.delay.delay(hold);
        self.write_frame(&pair.neutral)?;
        self.delay.delay(self.timing.release);
        Ok(())
    }

    fn write_frame(&mut self, frame: &ControllerFrame) -> Result<(), TransportError> {
        self.link.write_all(frame.as_bytes())?;
        self.link.flush()?;
        self.frames_sent += 1;
        debug!("frame {}: {frame}", self.frames_sent);
        Ok(())
    }
}
