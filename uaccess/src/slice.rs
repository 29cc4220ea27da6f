//! Slice-backed transfer carriers.
//!
//! These are the hosted implementations of the transfer capabilities: the
//! "user memory" is an ordinary slice owned by the caller. Overrunning the
//! slice is reported as a transfer fault, the same way a kernel reports an
//! unmapped user page.

use slate_core::{DevError, DevResult};

use crate::{UserReader, UserWriter};

// =============================================================================
// READ SIDE
// =============================================================================

/// A caller-supplied byte source backed by a borrowed slice.
#[derive(Debug)]
pub struct UserSlice<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> UserSlice<'a> {
    /// Wrap a borrowed slice as a transfer source.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl UserReader for UserSlice<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn consumed(&self) -> usize {
        self.pos
    }

    fn read_exact(&mut self, dst: &mut [u8]) -> DevResult<()> {
        let end = match self.pos.checked_add(dst.len()) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(DevError::TransferFault),
        };
        dst.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }
}

// =============================================================================
// WRITE SIDE
// =============================================================================

/// A caller-supplied byte destination backed by a borrowed mutable slice.
#[derive(Debug)]
pub struct UserSliceMut<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> UserSliceMut<'a> {
    /// Wrap a borrowed mutable slice as a transfer destination.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// View of the bytes written so far.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.pos]
    }
}

impl UserWriter for UserSliceMut<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn written(&self) -> usize {
        self.pos
    }

    fn write_all(&mut self, src: &[u8]) -> DevResult<()> {
        let end = match self.pos.checked_add(src.len()) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(DevError::TransferFault),
        };
        self.data[self.pos..end].copy_from_slice(src);
        self.pos = end;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_sequential() {
        let src = [1u8, 2, 3, 4, 5];
        let mut reader = UserSlice::new(&src);
        assert_eq!(reader.len(), 5);
        assert!(!reader.is_empty());

        let mut first = [0u8; 2];
        reader.read_exact(&mut first).unwrap();
        assert_eq!(first, [1, 2]);
        assert_eq!(reader.consumed(), 2);

        let mut rest = [0u8; 3];
        reader.read_exact(&mut rest).unwrap();
        assert_eq!(rest, [3, 4, 5]);
        assert_eq!(reader.consumed(), 5);
    }

    #[test]
    fn test_reader_overrun_faults() {
        let src = [1u8, 2, 3];
        let mut reader = UserSlice::new(&src);

        let mut dst = [0u8; 4];
        assert_eq!(reader.read_exact(&mut dst), Err(DevError::TransferFault));
        // Nothing consumed by the failed call.
        assert_eq!(reader.consumed(), 0);

        let mut dst = [0u8; 3];
        reader.read_exact(&mut dst).unwrap();
        assert_eq!(dst, [1, 2, 3]);
    }

    #[test]
    fn test_writer_sequential() {
        let mut buf = [0u8; 4];
        let mut writer = UserSliceMut::new(&mut buf);
        assert_eq!(writer.len(), 4);
        assert!(!writer.is_empty());

        writer.write_all(&[0xAA, 0xBB]).unwrap();
        writer.write_all(&[0xCC]).unwrap();
        assert_eq!(writer.written(), 3);
        assert_eq!(writer.filled(), &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_writer_overrun_faults() {
        let mut buf = [0u8; 2];
        let mut writer = UserSliceMut::new(&mut buf);

        assert_eq!(writer.write_all(&[1, 2, 3]), Err(DevError::TransferFault));
        assert_eq!(writer.written(), 0);

        writer.write_all(&[7, 8]).unwrap();
        assert_eq!(buf, [7, 8]);
    }
}
