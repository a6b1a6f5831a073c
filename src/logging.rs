//! Browser console logging.
//!
//! A `tracing-subscriber` fmt layer whose writer buffers one formatted event
//! and hands it to `console.log` when dropped. Only installed on wasm32;
//! native builds (tests) leave `tracing` without a subscriber.

#[cfg(target_arch = "wasm32")]
use std::io::{self, Write};

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

#[cfg(target_arch = "wasm32")]
impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            buf: Vec::with_capacity(256),
        }
    }
}

/// Per-event writer. Flushes to the console on [`Drop`].
#[cfg(target_arch = "wasm32")]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

#[cfg(target_arch = "wasm32")]
impl Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let msg = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&msg.trim_end().into());
    }
}

/// Install the panic hook and console subscriber. Safe to call twice.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    // SystemTime is unavailable in the browser, so no timestamps.
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init() {}
