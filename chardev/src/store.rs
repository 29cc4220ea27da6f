//! Fixed-capacity backing store.
//!
//! One contiguous byte buffer per device instance, zero-filled at
//! allocation. The store is exclusively owned by its device and freed by
//! ownership when the device goes away, so a double free is not expressible.
//! Byte ranges are only reachable through the transfer engine, which clamps
//! every access to the store's bounds.

use alloc::vec::Vec;

use slate_core::{DevError, DevResult};

/// A device's byte buffer. Capacity is fixed at allocation time.
#[derive(Debug)]
pub struct BackingStore {
    data: Vec<u8>,
}

impl BackingStore {
    /// Allocate a zero-filled store of exactly `capacity` bytes.
    ///
    /// Fails with [`DevError::InvalidArgument`] for a zero capacity and
    /// [`DevError::OutOfMemory`] when the allocator cannot satisfy the
    /// request.
    pub fn allocate(capacity: usize) -> DevResult<Self> {
        if capacity == 0 {
            return Err(DevError::InvalidArgument);
        }
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        data.resize(capacity, 0);
        Ok(Self { data })
    }

    /// Total capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes left between `offset` and the end of the store.
    #[inline]
    pub fn remaining(&self, offset: usize) -> usize {
        self.data.len().saturating_sub(offset)
    }

    /// Overwrite the whole store with `byte`.
    pub fn fill(&mut self, byte: u8) {
        self.data.fill(byte);
    }

    /// Reset the whole store to zero.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// View `len` bytes starting at `offset`. The caller must have clamped
    /// the range to the store's bounds.
    #[inline]
    pub(crate) fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Mutable view of `len` bytes starting at `offset`. The caller must
    /// have clamped the range to the store's bounds.
    #[inline]
    pub(crate) fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }
}

// =============================================================================
// Tests
// =============================================================================
