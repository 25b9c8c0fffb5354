// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The interactive shell session.
//!
//! A session owns the MIDI backend, the track store, and the selected
//! device name; there is no other state between commands. Each input
//! line is tokenized, parsed, and executed, and every error is reported
//! and swallowed at this boundary so no command can take the prompt
//! down.

pub mod command;
pub mod lexer;

use crossterm::style::Stylize;
use thiserror::Error;

use crate::midi::{MidiBackend, MidiError};
use crate::playback;
use crate::recording::{self, KeyboardStop, RawModeGuard, StopSignal};
use crate::track::{Track, TrackStore};

pub use command::{Command, ParseError, HELP_TEXT};

/// Errors recovered and reported at the command boundary.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Track '{0}' does not exist")]
    TrackNotFound(String),
    #[error("Select a device number between 1 and {0}")]
    IndexOutOfRange(usize),
    #[error("No midi device selected. Use 'list dev' and 'sel' to choose one")]
    NoDeviceSelected,
    #[error(transparent)]
    Midi(#[from] MidiError),
}

/// One interactive session: backend, track store, selected device.
pub struct Shell<B: MidiBackend> {
    backend: B,
    store: TrackStore,
    device: String,
}

impl<B: MidiBackend> Shell<B> {
    /// Create a session. The selected device defaults to the first
    /// detected input device; with nothing attached it stays empty until
    /// `sel` names one.
    pub fn new(backend: B) -> Self {
        let device = backend.input_names().into_iter().next().unwrap_or_default();
        Self {
            backend,
            store: TrackStore::new(),
            device,
        }
    }

    /// Name of the currently selected device.
    pub fn selected_device(&self) -> &str {
        &self.device
    }

    /// The session's track store.
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Process one line of input. Returns false when the session should
    /// end.
    pub fn handle_line(&mut self, line: &str) -> bool {
        let tokens = lexer::tokenize(line);
        match Command::parse(&tokens) {
            Ok(Command::Exit) => false,
            Ok(cmd) => {
                if let Err(err) = self.execute(cmd) {
                    println!("[!] {err}");
                }
                true
            }
            Err(err) => {
                println!("{err}");
                true
            }
        }
    }

    /// Execute a parsed command against the session state.
    pub fn execute(&mut self, cmd: Command) -> Result<(), ShellError> {
        match cmd {
            Command::Record { track } => self.record(&track),
            Command::Play { track } => self.play(&track),
            Command::ListDevices => {
                self.list_devices();
                Ok(())
            }
            Command::ListTracks => {
                self.list_tracks();
                Ok(())
            }
            Command::Delete { track } => self.delete(&track),
            Command::Select { device } => self.select_device(&device),
            Command::Kill => self.kill_notes(),
            Command::Help => {
                println!("{HELP_TEXT}");
                Ok(())
            }
            Command::Exit | Command::Blank => Ok(()),
        }
    }

    /// Record through the selected device with an explicit stop signal.
    ///
    /// This is the seam tests drive with scripted signals; the
    /// interactive path wires up [`KeyboardStop`] around it.
    pub fn record_with(&mut self, name: &str, stop: &mut dyn StopSignal) -> Result<(), ShellError> {
        self.require_device()?;
        let mut input = self.backend.open_input(&self.device)?;
        let track = recording::record(name, input.as_mut(), stop);
        drop(input); // release the port before reporting
        self.finish_recording(name, track);
        Ok(())
    }

    fn record(&mut self, name: &str) -> Result<(), ShellError> {
        self.require_device()?;
        // Open before switching terminal modes so a missing device is
        // reported on a sane terminal
        let mut input = self.backend.open_input(&self.device)?;

        println!("[*] Recording '{name}'");
        println!("Press Ctrl+C, Esc, or q to stop recording");

        let track = {
            let _raw = RawModeGuard::activate();
            recording::record(name, input.as_mut(), &mut KeyboardStop)
        };
        drop(input);
        self.finish_recording(name, track);
        Ok(())
    }

    fn finish_recording(&mut self, name: &str, track: Option<Track>) {
        match track {
            Some(track) => {
                println!(
                    "[*] Finished recording '{}' ({} events)",
                    name,
                    track.log.len()
                );
                self.store.put(track);
            }
            None => println!("[*] No events captured, '{name}' was not saved"),
        }
    }

    fn play(&mut self, name: &str) -> Result<(), ShellError> {
        let track = self
            .store
            .get(name)
            .ok_or_else(|| ShellError::TrackNotFound(name.to_string()))?;
        self.require_device()?;
        let mut output = self.backend.open_output(&self.device)?;

        println!("[*] Playing '{name}'");
        playback::play(track, output.as_mut())?;
        println!("[*] Finished playing '{name}'");
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), ShellError> {
        if self.store.remove(name) {
            println!("[*] Deleted track '{name}'");
            Ok(())
        } else {
            Err(ShellError::TrackNotFound(name.to_string()))
        }
    }

    fn select_device(&mut self, arg: &str) -> Result<(), ShellError> {
        let names = self.backend.input_names();

        if arg.len() == 1 && arg.as_bytes()[0].is_ascii_digit() {
            // A single digit is a 1-based index into `list dev`
            let index = arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
            match index.and_then(|i| names.get(i)) {
                Some(name) => {
                    self.device = name.clone();
                    println!("[*] Selected device '{}'", self.device);
                    Ok(())
                }
                None => Err(ShellError::IndexOutOfRange(names.len())),
            }
        } else {
            if !names.iter().any(|n| n == arg) {
                println!("[!] Warning: device '{arg}' is not detected.");
            }
            self.device = arg.to_string();
            println!("[*] Selected device '{}'", self.device);
            Ok(())
        }
    }

    fn kill_notes(&mut self) -> Result<(), ShellError> {
        self.require_device()?;
        let mut output = self.backend.open_output(&self.device)?;
        playback::all_notes_off(output.as_mut())?;
        println!("[*] Sent note-off to every note on '{}'", self.device);
        Ok(())
    }

    fn list_devices(&self) {
        let names = self.backend.input_names();
        if names.is_empty() {
            println!("No midi device available");
            return;
        }

        println!("{}", "Midi device list".underlined());
        for (i, name) in names.iter().enumerate() {
            if *name == self.device {
                println!(
                    "{}",
                    format!("{}: {} (Currently selected)", i + 1, name).magenta()
                );
            } else {
                println!("{}: {}", i + 1, name);
            }
        }
        println!();
    }

    fn list_tracks(&self) {
        if self.store.is_empty() {
            println!("No tracks have been recorded yet.");
            println!("Use 'rec [track_name]' to record one.");
            return;
        }

        println!("{}", "Track list".underlined());
        for name in self.store.names() {
            println!("  - {name}");
        }
        println!();
    }

    fn require_device(&self) -> Result<(), ShellError> {
        if self.device.is_empty() {
            return Err(ShellError::NoDeviceSelected);
        }
        Ok(())
    }
}
