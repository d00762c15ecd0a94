//! Routing text the native side emits while a container is opened
//!
//! `BMFile_Load` and `BMFile_Create` take a bare callback with no user
//! pointer. The sink for the current call is parked in a thread local for the
//! duration of that call and the callback forwards to it.

use bmap_ffi::{decode_text, OutputCallback, RawText};
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

thread_local! {
    static ACTIVE_SINK: RefCell<Option<OutputSink>> = RefCell::new(None);
}

/// Receiver for native output lines
#[derive(Clone)]
pub struct OutputSink(Arc<dyn Fn(&str) + Send + Sync>);

impl OutputSink {
    /// Sink calling `f` with every line
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Write every line verbatim to standard output
    pub fn stdout() -> Self {
        Self::new(|line| write_line(&mut std::io::stdout().lock(), line))
    }

    /// Forward every line to the `log` facade
    pub fn log() -> Self {
        Self::new(|line| log::info!(target: "bmap::native", "{}", line))
    }

    /// Discard everything
    pub fn silent() -> Self {
        Self::new(|_| {})
    }

    pub fn emit(&self, line: &str) {
        (self.0)(line)
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OutputSink")
    }
}

/// Write one line, a failed write is logged and the line dropped
fn write_line(out: &mut impl Write, line: &str) {
    if let Err(e) = writeln!(out, "{}", line) {
        log::warn!("Failed to write output line: {}", e);
    }
}

/// Installs a sink for the current thread and restores the previous one on drop
pub(crate) struct SinkGuard {
    previous: Option<OutputSink>,
}

impl SinkGuard {
    pub(crate) fn install(sink: &OutputSink) -> Self {
        let previous = ACTIVE_SINK.with(|slot| slot.replace(Some(sink.clone())));
        Self { previous }
    }

    /// Callback to hand to the native side while this guard lives
    pub(crate) fn callback(&self) -> Option<OutputCallback> {
        Some(forward_output as OutputCallback)
    }
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE_SINK.with(|slot| *slot.borrow_mut() = previous);
    }
}

unsafe extern "C" fn forward_output(message: RawText) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let Some(line) = (unsafe { decode_text(message) }) else {
            return;
        };

        // Cloned out so a sink may itself open a container
        let sink = ACTIVE_SINK.with(|slot| slot.borrow().clone());
        match sink {
            Some(sink) => sink.emit(&line),
            None => log::warn!("Dropped native output with no sink installed: {}", line),
        }
    }));

    if result.is_err() {
        log::error!("Output sink panicked");
    }
}
