// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timed replay of recorded tracks.
//!
//! Replay is a deliberate blocking walk of the log: sleep for each
//! event's recorded delay, then send it. Note-on/note-off ordering is
//! load-bearing, so events are never batched or reordered.

use std::thread;

use tracing::debug;

use crate::midi::{messages, MidiError, OutputConnection};
use crate::track::Track;

/// Replay a track, reproducing the recorded inter-event gaps.
///
/// A send failure aborts the replay; already-sent events stay sent, as
/// MIDI output is not transactional.
pub fn play(track: &Track, output: &mut dyn OutputConnection) -> Result<(), MidiError> {
    debug!(track = %track.name, events = track.log.len(), "replay started");

    for event in &track.log {
        thread::sleep(event.delay);
        output.send(&event.message)?;
    }

    debug!(track = %track.name, "replay finished");
    Ok(())
}

/// Send a note-off for every note number from 1 through 127 on channel 0.
///
/// Rescues notes left sounding by an interrupted take or replay.
pub fn all_notes_off(output: &mut dyn OutputConnection) -> Result<(), MidiError> {
    for note in 1..=127u8 {
        output.send(&[messages::NOTE_OFF, note, 0])?;
    }
    Ok(())
}
