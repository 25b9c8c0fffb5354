// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Recorded tracks and the in-memory track store.
//!
//! A track is a named, ordered log of MIDI events carrying the wall-clock
//! gap to the preceding event. Tracks live only for the process lifetime.

use std::collections::BTreeMap;
use std::time::Duration;

/// One captured MIDI message and the time elapsed since the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiEvent {
    /// Gap to the preceding event; always zero for the first event of a
    /// stored log
    pub delay: Duration,
    /// Raw MIDI bytes, kept opaque end to end
    pub message: Vec<u8>,
}

impl MidiEvent {
    pub fn new(delay: Duration, message: Vec<u8>) -> Self {
        Self { delay, message }
    }
}

/// A named recording. The log is append-only while recording and
/// immutable afterwards; replay only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub log: Vec<MidiEvent>,
}

/// In-process mapping from track name to recording.
///
/// Backed by a `BTreeMap`, so [`TrackStore::names`] lists in sorted order
/// and is deterministic across a run. The empty string is a legal (if
/// unusual) name.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: BTreeMap<String, Track>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a track, overwriting any previous recording under the same
    /// name.
    pub fn put(&mut self, track: Track) {
        self.tracks.insert(track.name.clone(), track);
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Track> {
        self.tracks.get(name)
    }

    /// Remove a track. Returns false when no track had that name, so the
    /// caller can report the miss distinctly from success.
    pub fn remove(&mut self, name: &str) -> bool {
        self.tracks.remove(name).is_some()
    }

    /// All track names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tracks.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> Track {
        Track {
            name: name.to_string(),
            log: vec![MidiEvent::new(Duration::ZERO, vec![0x90, 60, 100])],
        }
    }

    #[test]
    fn test_put_and_get() {
        let mut store = TrackStore::new();
        store.put(track("verse"));

        assert!(store.get("verse").is_some());
        assert!(store.get("chorus").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_overwrites_same_name() {
        let mut store = TrackStore::new();
        store.put(track("take"));

        let mut second = track("take");
        second.log.push(MidiEvent::new(
            Duration::from_millis(100),
            vec![0x80, 60, 0],
        ));
        store.put(second);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("take").unwrap().log.len(), 2);
    }

    #[test]
    fn test_remove_reports_missing() {
        let mut store = TrackStore::new();
        store.put(track("solo"));

        assert!(store.remove("solo"));
        // Removing the same name twice reports the miss both times
        assert!(!store.remove("solo"));
        assert!(!store.remove("solo"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let mut store = TrackStore::new();
        store.put(track("outro"));
        store.put(track("bridge"));
        store.put(track("intro"));

        assert_eq!(store.names(), vec!["bridge", "intro", "outro"]);
    }

    #[test]
    fn test_empty_string_is_a_legal_name() {
        let mut store = TrackStore::new();
        store.put(track(""));

        assert!(store.get("").is_some());
        assert_eq!(store.names(), vec![""]);
        assert!(store.remove(""));
    }
}
