//! Fault-injecting transfer doubles.
//!
//! Drivers must leave the session cursor untouched when a raw copy fails
//! partway through. These doubles simulate an unmapped user page at a chosen
//! byte offset so tests can exercise that path deterministically.

use slate_core::{DevError, DevResult};

use crate::{UserReader, UserWriter};

/// A destination that accepts a fixed number of bytes, then faults.
///
/// Reports an effectively unbounded length so the fault is always attributed
/// to the copy itself rather than to an undersized buffer.
#[derive(Debug)]
pub struct FaultyWriter {
    accept: usize,
    pos: usize,
}

impl FaultyWriter {
    /// Create a writer that faults once more than `accept` bytes arrive.
    pub const fn new(accept: usize) -> Self {
        Self { accept, pos: 0 }
    }
}

impl UserWriter for FaultyWriter {
    fn len(&self) -> usize {
        usize::MAX
    }

    fn written(&self) -> usize {
        self.pos
    }

    fn write_all(&mut self, src: &[u8]) -> DevResult<()> {
        let end = match self.pos.checked_add(src.len()) {
            Some(end) if end <= self.accept => end,
            _ => return Err(DevError::TransferFault),
        };
        self.pos = end;
        Ok(())
    }
}

/// A source that serves a repeated fill byte, then faults.
#[derive(Debug)]
pub struct FaultyReader {
    fill: u8,
    serve: usize,
    pos: usize,
}

impl FaultyReader {
    /// Create a reader of `fill` bytes that faults once more than `serve`
    /// bytes are requested.
    pub const fn new(fill: u8, serve: usize) -> Self {
        Self { fill, serve, pos: 0 }
    }
}

impl UserReader for FaultyReader {
    fn len(&self) -> usize {
        usize::MAX
    }

    fn consumed(&self) -> usize {
        self.pos
    }

    fn read_exact(&mut self, dst: &mut [u8]) -> DevResult<()> {
        let end = match self.pos.checked_add(dst.len()) {
            Some(end) if end <= self.serve => end,
            _ => return Err(DevError::TransferFault),
        };
        dst.fill(self.fill);
        self.pos = end;
        Ok(())
    }
}
