// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI I/O abstraction layer.
//!
//! This module provides trait-based abstractions for the MIDI port
//! capability: enumerating input devices and opening input/output
//! connections. Backends (midir in production, scripted mocks in tests)
//! implement these traits interchangeably.

pub mod midir_backend;

use std::time::Duration;

use thiserror::Error;

pub use midir_backend::MidirBackend;

/// Errors surfaced by the MIDI port capability.
#[derive(Debug, Error)]
pub enum MidiError {
    /// The named device is not present in the current enumeration or
    /// refused the connection.
    #[error("midi device '{0}' is unavailable")]
    DeviceUnavailable(String),
    /// The platform MIDI client could not be initialized at all.
    #[error("midi backend error: {0}")]
    Backend(String),
    /// A message could not be transmitted mid-stream.
    #[error("failed to send midi message: {0}")]
    SendFailed(String),
}

/// Access to the system's MIDI devices.
///
/// This is the single seam between the shell and the platform MIDI
/// transport. Device names are re-resolved against the live enumeration
/// at every open, so a selection can go stale and surface as
/// [`MidiError::DeviceUnavailable`] at use time.
pub trait MidiBackend {
    /// Names of the currently attached input devices, in enumeration order.
    fn input_names(&self) -> Vec<String>;

    /// Open a live input connection to the named device.
    fn open_input(&self, name: &str) -> Result<Box<dyn InputConnection>, MidiError>;

    /// Open an output connection to the named device.
    fn open_output(&self, name: &str) -> Result<Box<dyn OutputConnection>, MidiError>;
}

/// A live stream of incoming MIDI messages.
///
/// The stream is unbounded and non-restartable. Dropping the connection
/// closes the underlying port, so holding one inside a scope gives
/// guaranteed release on every exit path.
pub trait InputConnection: Send {
    /// Wait up to `timeout` for the next incoming message.
    ///
    /// Returns `None` when the timeout elapses without one.
    fn recv_timeout(&mut self, timeout: Duration) -> Option<Vec<u8>>;
}

/// A connection that transmits MIDI messages to a device.
pub trait OutputConnection: Send {
    /// Send a single raw MIDI message.
    fn send(&mut self, message: &[u8]) -> Result<(), MidiError>;
}

/// MIDI message constants
pub mod messages {
    // Channel Voice Messages (upper nibble, lower nibble is channel 0-15)
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;
    pub const CONTROL_CHANGE: u8 = 0xB0;
}
