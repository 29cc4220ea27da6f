//! Offset-bounded transfer engine.
//!
//! All byte movement between a caller and a [`BackingStore`] goes through
//! this module. The rules are small and absolute:
//!
//! - Requested lengths are advisory. A transfer moves at most
//!   `capacity - offset` bytes; the clamp happens before any copy.
//! - A read with the cursor at or past the end returns `Ok(0)`. End of
//!   device is not an error.
//! - A write with the cursor at or past the end fails with
//!   [`DevError::CapacityExceeded`]. A full device never silently drops
//!   bytes.
//! - The cursor advances by exactly the number of bytes moved, and only
//!   after the copy fully succeeded. A faulted copy leaves it untouched.
//!
//! The flat variants implement the cursorless degraded mode: every transfer
//! starts at index zero and an oversize request is rejected outright instead
//! of clamped. Devices select between the two with [`TransferMode`].

use slate_core::{DevError, DevResult};
use slate_uaccess::{UserReader, UserWriter};

use crate::session::Session;
use crate::store::BackingStore;

/// How a device maps transfers onto its store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferMode {
    /// Cursor-based sequential transfers with clamping. The reference
    /// behavior.
    #[default]
    Seekable,
    /// Cursorless transfers at index zero. Oversize requests are rejected
    /// with [`DevError::InvalidArgument`] instead of clamped.
    Flat,
}

/// Bytes a transfer may move: `min(requested, capacity - offset)`.
const fn clamp(requested: usize, capacity: usize, offset: usize) -> usize {
    let available = capacity.saturating_sub(offset);
    if requested < available {
        requested
    } else {
        available
    }
}

// =============================================================================
// SEEKABLE TRANSFERS
// =============================================================================

/// Copy up to `requested` bytes from the store into `dest` at the session
/// cursor, advancing the cursor by the number of bytes moved.
pub fn read(
    store: &BackingStore,
    session: &mut Session,
    dest: &mut dyn UserWriter,
    requested: usize,
) -> DevResult<usize> {
    let offset = session.offset();
    if offset >= store.capacity() {
        return Ok(0);
    }
    let effective = clamp(requested, store.capacity(), offset);
    if effective == 0 {
        return Ok(0);
    }
    dest.write_all(store.slice(offset, effective))?;
    session.advance(effective);
    Ok(effective)
}

/// Copy up to `requested` bytes from `src` into the store at the session
/// cursor, advancing the cursor by the number of bytes moved.
pub fn write(
    store: &mut BackingStore,
    session: &mut Session,
    src: &mut dyn UserReader,
    requested: usize,
) -> DevResult<usize> {
    let offset = session.offset();
    if offset >= store.capacity() {
        return Err(DevError::CapacityExceeded);
    }
    let effective = clamp(requested, store.capacity(), offset);
    if effective == 0 {
        return Ok(0);
    }
    src.read_exact(store.slice_mut(offset, effective))?;
    session.advance(effective);
    Ok(effective)
}

// =============================================================================
// FLAT TRANSFERS
// =============================================================================

/// Copy `requested` bytes from the start of the store into `dest`.
pub fn read_flat(
    store: &BackingStore,
    dest: &mut dyn UserWriter,
    requested: usize,
) -> DevResult<usize> {
    if requested > store.capacity() {
        return Err(DevError::InvalidArgument);
    }
    dest.write_all(store.slice(0, requested))?;
    Ok(requested)
}

/// Copy `requested` bytes from `src` into the start of the store.
pub fn write_flat(
    store: &mut BackingStore,
    src: &mut dyn UserReader,
    requested: usize,
) -> DevResult<usize> {
    if requested > store.capacity() {
        return Err(DevError::InvalidArgument);
    }
    src.read_exact(store.slice_mut(0, requested))?;
    Ok(requested)
}

// =============================================================================
// Tests
// =============================================================================
