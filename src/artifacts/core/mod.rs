//! Core utilities and shared types
//!
//! Output plumbing shared by every command: reports either go straight to stdout or are
//! buffered into the `minus` pager and shown once the command finishes. Commands that emit
//! raw object bytes always write to stdout.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper
/// adapts it to be compatible with Rust's standard I/O traits. The pager only holds text:
/// bytes that are not UTF-8 are rejected with `InvalidData` rather than rewritten.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where command output ends up
pub enum Output {
    Stdout,
    Paged(Pager),
}

impl Output {
    /// Page only when a human is watching and paging was not disabled
    pub fn detect(no_pager: bool) -> Self {
        if no_pager || !io::stdout().is_terminal() {
            Output::Stdout
        } else {
            Output::Paged(Pager::new())
        }
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            Output::Stdout => Box::new(io::stdout()),
            Output::Paged(pager) => Box::new(PagerWriter::new(pager.clone())),
        }
    }

    /// Show buffered output, if any
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            Output::Stdout => io::stdout().flush()?,
            Output::Paged(pager) => minus::page_all(pager)?,
        }

        Ok(())
    }
}
