//! User-facing output of the probe.
//!
//! Threshold warnings and the "stats unavailable" notice go to stdout, one
//! line each; per-attempt failure diagnostics go to stderr. Tracing output
//! is separate and is not routed through here.

use std::error::Error;
use std::io::{self, Stderr, Stdout, Write};

use statwatch_core::constants::STATS_UNAVAILABLE_NOTICE;
use statwatch_core::thresholds::ThresholdViolation;

/// Line-oriented writer over an output and an error stream.
///
/// Write failures are dropped: a closed stdout must not stop the probe.
pub struct Console<O = Stdout, E = Stderr> {
    out: O,
    err: E,
}

impl Console {
    /// Console bound to the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Print one threshold warning to the output stream.
    pub fn report_violation(&mut self, violation: &ThresholdViolation) {
        let _ = writeln!(self.out, "{violation}");
    }

    /// Print a failed poll attempt, with the full error chain, to the error stream.
    pub fn report_failure(&mut self, attempt: u32, error: &(dyn Error + 'static)) {
        let _ = writeln!(self.err, "Error (attempt {attempt}): {}", error_chain(error));
    }

    /// Print the "stats unavailable" notice to the output stream.
    pub fn report_unavailable(&mut self) {
        let _ = writeln!(self.out, "{STATS_UNAVAILABLE_NOTICE}");
    }

    /// Give back the underlying streams.
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// Render an error and all of its sources as `outer: inner: innermost`.
fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
