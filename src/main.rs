// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! DECK entry point: a prompt loop over one shell session.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use crossterm::style::Stylize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use deck::midi::MidirBackend;
use deck::shell::Shell;

const BANNER: &str = r"
    ██████╗ ███████╗ ██████╗██╗  ██╗
    ██╔══██╗██╔════╝██╔════╝██║ ██╔╝
    ██║  ██║█████╗  ██║     █████╔╝
    ██║  ██║██╔══╝  ██║     ██╔═██╗
    ██████╔╝███████╗╚██████╗██║  ██╗
    ╚═════╝ ╚══════╝ ╚═════╝╚═╝  ╚═╝
";

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with the prompt
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut shell = Shell::new(MidirBackend::new());
    debug!(device = shell.selected_device(), "session started");

    println!("{}", BANNER.magenta());
    println!("Interface for recording and replaying midi tracks.");
    println!("Type 'help' for more information.\n");

    let mut input = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like exit
            println!();
            break;
        }
        if !shell.handle_line(&line) {
            break;
        }
    }

    Ok(())
}
