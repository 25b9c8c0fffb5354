// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! DECK - an interactive MIDI tape deck.
//!
//! Records live MIDI input under named tracks and replays them with the
//! original inter-event timing. The shell drives everything; the MIDI
//! transport sits behind backend traits so sessions can be exercised
//! without hardware.

pub mod midi;
pub mod playback;
pub mod recording;
pub mod shell;
pub mod track;
