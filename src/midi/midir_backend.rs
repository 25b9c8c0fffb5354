// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! midir backend.
//!
//! Cross-platform implementation of the MIDI port traits on top of midir.
//! Incoming messages are forwarded from the midir callback thread into an
//! mpsc channel that the recorder drains with a timeout.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use tracing::debug;

use super::{InputConnection, MidiBackend, MidiError, OutputConnection};

const CLIENT_NAME: &str = "deck";

/// midir-based implementation of [`MidiBackend`].
pub struct MidirBackend;

impl MidirBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MidirBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiBackend for MidirBackend {
    fn input_names(&self) -> Vec<String> {
        let Ok(midi_in) = MidiInput::new(CLIENT_NAME) else {
            return Vec::new();
        };
        midi_in
            .ports()
            .iter()
            .filter_map(|port| midi_in.port_name(port).ok())
            .collect()
    }

    fn open_input(&self, name: &str) -> Result<Box<dyn InputConnection>, MidiError> {
        let mut midi_in =
            MidiInput::new(CLIENT_NAME).map_err(|e| MidiError::Backend(e.to_string()))?;
        // Record everything the device sends, clock and sysex included
        midi_in.ignore(Ignore::None);

        let ports = midi_in.ports();
        let port = ports
            .iter()
            .find(|p| midi_in.port_name(p).map(|n| n == name).unwrap_or(false))
            .ok_or_else(|| MidiError::DeviceUnavailable(name.to_string()))?;

        let (tx, rx) = mpsc::channel();
        let connection = midi_in
            .connect(
                port,
                "deck-input",
                move |_timestamp, message, _| {
                    let _ = tx.send(message.to_vec());
                },
                (),
            )
            .map_err(|_| MidiError::DeviceUnavailable(name.to_string()))?;

        debug!(device = name, "opened midi input");
        Ok(Box::new(MidirInputConnection {
            _connection: connection,
            receiver: rx,
        }))
    }

    fn open_output(&self, name: &str) -> Result<Box<dyn OutputConnection>, MidiError> {
        let midi_out =
            MidiOutput::new(CLIENT_NAME).map_err(|e| MidiError::Backend(e.to_string()))?;

        let ports = midi_out.ports();
        let port = ports
            .iter()
            .find(|p| midi_out.port_name(p).map(|n| n == name).unwrap_or(false))
            .ok_or_else(|| MidiError::DeviceUnavailable(name.to_string()))?;

        let connection = midi_out
            .connect(port, "deck-output")
            .map_err(|_| MidiError::DeviceUnavailable(name.to_string()))?;

        debug!(device = name, "opened midi output");
        Ok(Box::new(MidirOutputConnection { connection }))
    }
}

/// Input connection fed by the midir callback thread.
struct MidirInputConnection {
    _connection: MidiInputConnection<()>,
    receiver: Receiver<Vec<u8>>,
}

impl InputConnection for MidirInputConnection {
    fn recv_timeout(&mut self, timeout: Duration) -> Option<Vec<u8>> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

struct MidirOutputConnection {
    connection: MidiOutputConnection,
}

impl OutputConnection for MidirOutputConnection {
    fn send(&mut self, message: &[u8]) -> Result<(), MidiError> {
        self.connection
            .send(message)
            .map_err(|e| MidiError::SendFailed(e.to_string()))
    }
}
