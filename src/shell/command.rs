// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The command set.
//!
//! One closed enum with a variant per command, so dispatch is an
//! exhaustive match instead of string comparisons scattered through the
//! shell. Parsing is case-sensitive on the first token; arguments are
//! positional, and a present-but-empty token is a legal argument (a
//! track really can be named "").

use thiserror::Error;

const USAGE_REC: &str = "rec [track_name]";
const USAGE_PLAY: &str = "play [track_name]";
const USAGE_DEL: &str = "del [track_name]";
const USAGE_SEL: &str = "sel [midi_device]\n\tUse either the midi device name within quotation marks\n\tor the device number from 'list dev'.";
const USAGE_LIST: &str =
    "list [object]\nObject:\n\tlist track\t- shows a list of recorded tracks\n\tlist dev\t- shows a list of midi devices";

/// The static command reference printed by `help`.
pub const HELP_TEXT: &str = "\
List of commands:
    rec [track_name]     - record a midi log from midi input
    play [track_name]    - play a recorded track
    list [object]        - list tracks or midi devices ('list' for more info)
    sel [midi_device]    - select a midi device
    del [track_name]     - delete a recorded midi log
    kill                 - kill all notes on the midi device
    help                 - print this help message
    exit                 - exit the program";

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Record { track: String },
    Play { track: String },
    ListDevices,
    ListTracks,
    Delete { track: String },
    Select { device: String },
    Kill,
    Help,
    Exit,
    /// Blank input line; a no-op
    Blank,
}

/// A line that did not parse into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Syntax: {0}")]
    Usage(&'static str),
    #[error("Invalid command '{0}'. Type 'help' for a list of commands.")]
    Invalid(String),
}

impl Command {
    /// Parse a token sequence produced by [`super::lexer::tokenize`].
    pub fn parse(tokens: &[String]) -> Result<Self, ParseError> {
        let head = tokens.first().map(String::as_str).unwrap_or("");
        match head {
            "rec" => Ok(Command::Record {
                track: arg(tokens, USAGE_REC)?,
            }),
            "play" => Ok(Command::Play {
                track: arg(tokens, USAGE_PLAY)?,
            }),
            "list" => match tokens.get(1).map(String::as_str) {
                Some("dev") => Ok(Command::ListDevices),
                Some("track") => Ok(Command::ListTracks),
                _ => Err(ParseError::Usage(USAGE_LIST)),
            },
            "del" => Ok(Command::Delete {
                track: arg(tokens, USAGE_DEL)?,
            }),
            "sel" => Ok(Command::Select {
                device: arg(tokens, USAGE_SEL)?,
            }),
            "kill" => Ok(Command::Kill),
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            "" => Ok(Command::Blank),
            other => Err(ParseError::Invalid(other.to_string())),
        }
    }
}

fn arg(tokens: &[String], usage: &'static str) -> Result<String, ParseError> {
    tokens.get(1).cloned().ok_or(ParseError::Usage(usage))
}
