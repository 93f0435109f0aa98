//! Tracing setup for native builds and the browser console

use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "editor_bridge=info";

/// Install a stderr subscriber honouring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true),
        )
        .try_init()
        .is_ok()
}

/// Install a subscriber that writes to the browser console.
///
/// Timestamps are disabled: `SystemTime` is unavailable on
/// `wasm32-unknown-unknown`.
pub fn init_console(filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(ConsoleMakeWriter)
                .with_ansi(false)
                .without_time()
                .with_target(true),
        )
        .try_init()
        .is_ok()
}

#[derive(Clone, Copy)]
struct ConsoleMakeWriter;

/// Buffers one formatted event and hands it to `console.log` on drop
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            buf: Vec::with_capacity(256),
        }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&text.trim_end().into());
    }
}
