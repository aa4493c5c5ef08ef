//! # Sink — Prime Destinations
//!
//! Implementations of [`crate::Sink`] used by the library and the CLI:
//!
//! - [`CountOnly`]: discards every prime (the "no sink" mode).
//! - `Vec<u64>`: collects primes in memory; used by the base prime finder.
//! - [`WriterSink`]: one decimal prime per line through a `BufWriter`.
//!
//! The engines assume `emit` cannot fail. `WriterSink` absorbs I/O errors: the
//! first failed write is logged, the buffered tail is discarded without a
//! flush, and the rest of the run continues count-only. The caller learns about the failure from `finish`.

use crate::Sink;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Sink that ignores every prime.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountOnly;

impl Sink for CountOnly {
    #[inline]
    fn emit(&mut self, _prime: u64) {}
}

impl Sink for Vec<u64> {
    #[inline]
    fn emit(&mut self, prime: u64) {
        self.push(prime);
    }
}

/// Writes primes as newline-terminated decimal text.
pub struct WriterSink<W: Write> {
    out: Option<BufWriter<W>>,
    written: u64,
    error: Option<io::Error>,
}

impl WriterSink<File> {
    /// Create (or truncate) `path` and write primes into it.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("could not open output file '{}'", path.display()))?;
        Ok(WriterSink::new(file))
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        WriterSink {
            out: Some(BufWriter::new(inner)),
            written: 0,
            error: None,
        }
    }

    /// Flush and return the inner writer.
    ///
    /// Fails if any write failed during the run or the final flush fails.
    pub fn finish(self) -> Result<W> {
        if let Some(err) = self.error {
            return Err(err).context(format!(
                "prime output stopped after {} primes",
                self.written
            ));
        }
        match self.out {
            Some(out) => out
                .into_inner()
                .map_err(|e| e.into_error())
                .context("flushing prime output"),
            None => anyhow::bail!("prime output already closed"),
        }
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn emit(&mut self, prime: u64) {
        if let Some(out) = self.out.as_mut() {
            match writeln!(out, "{}", prime) {
                Ok(()) => self.written += 1,
                Err(e) => {
                    warn!(
                        error = %e,
                        written = self.written,
                        "prime output failed, continuing count-only"
                    );
                    // into_parts skips the flush-on-drop of the stale buffer
                    if let Some(out) = self.out.take() {
                        let _ = out.into_parts();
                    }
                    self.error = Some(e);
                }
            }
        }
    }
}
