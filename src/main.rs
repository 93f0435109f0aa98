//! Replay host messages through the bridge without a browser.
//!
//! Reads one JSON envelope per line from a file (or stdin) and prints each
//! core call it produces as a JSON line on stdout.
//!
//!   editor-bridge messages.jsonl
//!   RUST_LOG=editor_bridge=debug editor-bridge < messages.jsonl

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use editor_bridge::{Bridge, Dispatch, LaunchOptions, RequestLedger, TranscriptCore};
use tracing::{info, warn};

/// Replay command line arguments.
#[derive(Parser, Debug)]
#[command(name = "editor-bridge")]
#[command(about = "Replay host messages and print the core calls they produce")]
struct Args {
    /// JSONL file of host messages; stdin when omitted
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,

    /// Document name passed to `run_editor`
    #[arg(long, value_name = "NAME")]
    document: Option<String>,
}

/// Line counts for one replay run
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    handled: usize,
    ignored: usize,
    failed: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    editor_bridge::logging::init();

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut options = LaunchOptions::default();
    if let Some(document) = args.document {
        options.document = document;
    }

    let summary = replay(input, io::stdout().lock(), options)?;
    info!(
        handled = summary.handled,
        ignored = summary.ignored,
        failed = summary.failed,
        "replay finished"
    );
    Ok(())
}

/// Launch a transcript session and feed it every non-blank input line
fn replay(
    input: impl BufRead,
    mut out: impl Write,
    options: LaunchOptions,
) -> anyhow::Result<Summary> {
    let ledger = Rc::new(RequestLedger::new());
    let mut bridge = Bridge::launch(TranscriptCore::new(), options, ledger)
        .context("failed to launch editor session")?;
    flush_calls(&mut bridge, &mut out)?;

    let mut summary = Summary::default();
    for (number, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                warn!(line = number + 1, error = %err, "not JSON");
                summary.failed += 1;
                continue;
            }
        };
        match bridge.handle_value(&value) {
            Ok(Dispatch::Handled(_)) => summary.handled += 1,
            Ok(Dispatch::Ignored) => {
                info!(line = number + 1, "ignored");
                summary.ignored += 1;
            }
            Err(err) => {
                warn!(line = number + 1, error = %err, "rejected");
                summary.failed += 1;
            }
        }
        flush_calls(&mut bridge, &mut out)?;
    }
    Ok(summary)
}

fn flush_calls(bridge: &mut Bridge<TranscriptCore>, out: &mut impl Write) -> anyhow::Result<()> {
    for call in bridge.core_mut().take_calls() {
        writeln!(out, "{}", serde_json::to_string(&call)?)?;
    }
    Ok(())
}
