// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for DECK
//!
//! These tests drive whole record/store/replay flows through the shell
//! against a scripted MIDI backend, without real hardware.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use deck::midi::{InputConnection, MidiBackend, MidiError, OutputConnection};
use deck::recording::StopSignal;
use deck::shell::{Command, Shell};

/// A backend whose one device replays a scripted incoming stream and
/// captures everything sent back out.
struct ScriptedBackend {
    device: String,
    incoming: Arc<Mutex<VecDeque<(Duration, Vec<u8>)>>>,
    sent: Arc<Mutex<Vec<(Instant, Vec<u8>)>>>,
}

impl ScriptedBackend {
    fn new(device: &str) -> Self {
        Self {
            device: device.to_string(),
            incoming: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn queue_incoming(&self, events: &[(Duration, &[u8])]) {
        let mut incoming = self.incoming.lock().unwrap();
        for (gap, message) in events {
            incoming.push_back((*gap, message.to_vec()));
        }
    }
}

struct ScriptedInput(Arc<Mutex<VecDeque<(Duration, Vec<u8>)>>>);

impl InputConnection for ScriptedInput {
    fn recv_timeout(&mut self, _timeout: Duration) -> Option<Vec<u8>> {
        let (gap, message) = self.0.lock().unwrap().pop_front()?;
        if !gap.is_zero() {
            thread::sleep(gap);
        }
        Some(message)
    }
}

struct CapturingOutput(Arc<Mutex<Vec<(Instant, Vec<u8>)>>>);

impl OutputConnection for CapturingOutput {
    fn send(&mut self, message: &[u8]) -> Result<(), MidiError> {
        self.0.lock().unwrap().push((Instant::now(), message.to_vec()));
        Ok(())
    }
}

impl MidiBackend for ScriptedBackend {
    fn input_names(&self) -> Vec<String> {
        vec![self.device.clone()]
    }

    fn open_input(&self, name: &str) -> Result<Box<dyn InputConnection>, MidiError> {
        if name != self.device {
            return Err(MidiError::DeviceUnavailable(name.to_string()));
        }
        Ok(Box::new(ScriptedInput(self.incoming.clone())))
    }

    fn open_output(&self, name: &str) -> Result<Box<dyn OutputConnection>, MidiError> {
        if name != self.device {
            return Err(MidiError::DeviceUnavailable(name.to_string()));
        }
        Ok(Box::new(CapturingOutput(self.sent.clone())))
    }
}

/// Stops the recorder once the scripted stream is exhausted.
struct StopWhenDrained(Arc<Mutex<VecDeque<(Duration, Vec<u8>)>>>);

impl StopSignal for StopWhenDrained {
    fn should_stop(&mut self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

#[test]
fn test_record_store_replay_round_trip() {
    let backend = ScriptedBackend::new("Scripted Keys");
    backend.queue_incoming(&[
        (Duration::ZERO, &[0x90, 60, 100]),
        (Duration::from_millis(25), &[0x80, 60, 0]),
        (Duration::from_millis(15), &[0x90, 62, 90]),
    ]);
    let mut stop = StopWhenDrained(backend.incoming.clone());
    let sent = backend.sent.clone();
    let mut shell = Shell::new(backend);

    shell.record_with("riff", &mut stop).unwrap();

    // Stored with the recording invariants intact
    let track = shell.store().get("riff").expect("track was stored");
    assert_eq!(track.log.len(), 3);
    assert_eq!(track.log[0].delay, Duration::ZERO);
    assert!(track.log[1].delay >= Duration::from_millis(25));

    shell
        .execute(Command::Play {
            track: "riff".to_string(),
        })
        .unwrap();

    // Replay emitted the same bytes in the same order
    let sent = sent.lock().unwrap();
    let messages: Vec<_> = sent.iter().map(|(_, m)| m.clone()).collect();
    assert_eq!(
        messages,
        vec![vec![0x90, 60, 100], vec![0x80, 60, 0], vec![0x90, 62, 90]]
    );

    // With gaps at least as long as the recorded delays
    let gap = sent[1].0 - sent[0].0;
    assert!(gap >= Duration::from_millis(25), "gap was {gap:?}");
}

#[test]
fn test_empty_recording_session_stores_nothing() {
    let backend = ScriptedBackend::new("Scripted Keys");
    let mut stop = StopWhenDrained(backend.incoming.clone());
    let mut shell = Shell::new(backend);

    shell.record_with("ghost", &mut stop).unwrap();

    assert!(shell.store().is_empty());
    assert!(shell.store().get("ghost").is_none());
}

#[test]
fn test_re_recording_overwrites_previous_take() {
    let backend = ScriptedBackend::new("Scripted Keys");
    backend.queue_incoming(&[
        (Duration::ZERO, &[0x90, 60, 100]),
        (Duration::ZERO, &[0x80, 60, 0]),
    ]);
    let mut stop = StopWhenDrained(backend.incoming.clone());
    let incoming = backend.incoming.clone();
    let mut shell = Shell::new(backend);

    shell.record_with("take", &mut stop).unwrap();
    assert_eq!(shell.store().get("take").unwrap().log.len(), 2);

    incoming
        .lock()
        .unwrap()
        .push_back((Duration::ZERO, vec![0x90, 72, 80]));
    let mut stop = StopWhenDrained(incoming.clone());
    shell.record_with("take", &mut stop).unwrap();

    let track = shell.store().get("take").unwrap();
    assert_eq!(track.log.len(), 1);
    assert_eq!(track.log[0].message, vec![0x90, 72, 80]);
}

#[test]
fn test_command_lifecycle_through_handle_line() {
    let backend = ScriptedBackend::new("Scripted Keys");
    backend.queue_incoming(&[(Duration::ZERO, &[0x90, 60, 100])]);
    let mut stop = StopWhenDrained(backend.incoming.clone());
    let mut shell = Shell::new(backend);

    shell.record_with("my track", &mut stop).unwrap();
    assert!(shell.store().get("my track").is_some());

    // Quoted names flow through lexer, parser, and store as one token
    assert!(shell.handle_line("play \"my track\"\n"));
    assert!(shell.handle_line("del \"my track\"\n"));
    assert!(shell.store().is_empty());

    // Deleting again just reports the miss; the loop continues
    assert!(shell.handle_line("del \"my track\"\n"));

    assert!(shell.handle_line("list track\n"));
    assert!(shell.handle_line("list dev\n"));
    assert!(shell.handle_line("help\n"));
    assert!(!shell.handle_line("exit\n"));
}

#[test]
fn test_kill_reaches_the_device() {
    let backend = ScriptedBackend::new("Scripted Keys");
    let sent = backend.sent.clone();
    let mut shell = Shell::new(backend);

    assert!(shell.handle_line("kill\n"));

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 127);
    assert!(sent.iter().all(|(_, m)| m[0] == 0x80));
    let notes: Vec<u8> = sent.iter().map(|(_, m)| m[1]).collect();
    assert_eq!(notes, (1..=127).collect::<Vec<u8>>());
}

#[test]
fn test_selection_survives_failed_reselection() {
    let backend = ScriptedBackend::new("Scripted Keys");
    let mut shell = Shell::new(backend);
    assert_eq!(shell.selected_device(), "Scripted Keys");

    // Only one device attached: index 2 is out of range, state unchanged
    assert!(shell.handle_line("sel 2\n"));
    assert_eq!(shell.selected_device(), "Scripted Keys");

    // A literal name always selects, detected or not
    assert!(shell.handle_line("sel \"Phantom Synth\"\n"));
    assert_eq!(shell.selected_device(), "Phantom Synth");
}
