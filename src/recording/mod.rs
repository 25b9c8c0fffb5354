// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Live MIDI capture.
//!
//! The recorder drains an input connection until a stop signal fires,
//! stamping every message with the wall-clock gap since the previous one.
//! Cancellation is cooperative: the signal is polled between receives
//! instead of relying on OS signal delivery, which keeps recording
//! testable without a terminal.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, warn};

use crate::midi::InputConnection;
use crate::track::{MidiEvent, Track};

/// How long one receive waits before the stop signal is re-checked.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Cooperative cancellation for a recording in progress.
///
/// Polled between receives, so a recording ends within one poll interval
/// of the signal firing.
pub trait StopSignal {
    fn should_stop(&mut self) -> bool;
}

/// Stop signal driven by the keyboard: Ctrl+C, Esc, or `q`.
///
/// Key events only arrive unbuffered while the terminal is in raw mode;
/// wrap the recording in a [`RawModeGuard`].
pub struct KeyboardStop;

impl StopSignal for KeyboardStop {
    fn should_stop(&mut self) -> bool {
        while event::poll(Duration::ZERO).unwrap_or(false) {
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return true;
                }
                _ => {}
            }
        }
        false
    }
}

/// Puts the terminal into raw mode and restores it on drop, so no exit
/// path leaves the terminal raw.
pub struct RawModeGuard;

impl RawModeGuard {
    /// Enable raw mode. Returns `None` (and records a warning) when the
    /// terminal refuses, e.g. with piped stdin.
    pub fn activate() -> Option<Self> {
        match terminal::enable_raw_mode() {
            Ok(()) => Some(Self),
            Err(err) => {
                warn!(%err, "raw mode unavailable, stop keys may need Enter");
                None
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Record incoming MIDI messages until `stop` fires.
///
/// Each message is stamped with the gap since the previous one; the
/// clock starts at the call, so the wait before the first press is
/// measured but then discarded: on completion the first event's delay is
/// forced to zero as an explicit normalization step. A session that
/// captured nothing returns `None` and must not be stored.
pub fn record(
    name: &str,
    input: &mut dyn InputConnection,
    stop: &mut dyn StopSignal,
) -> Option<Track> {
    let mut log: Vec<MidiEvent> = Vec::new();
    let mut last_event_time = Instant::now();

    loop {
        if stop.should_stop() {
            break;
        }
        if let Some(message) = input.recv_timeout(POLL_INTERVAL) {
            let now = Instant::now();
            log.push(MidiEvent::new(now - last_event_time, message));
            last_event_time = now;
        }
    }

    debug!(track = name, events = log.len(), "recording stopped");

    if log.is_empty() {
        return None;
    }
    log[0].delay = Duration::ZERO;
    Some(Track {
        name: name.to_string(),
        log,
    })
}
