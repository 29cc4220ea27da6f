//! # Slate User Memory Capability
//!
//! The primitive that moves bytes across the trust boundary between a
//! device and its caller.
//!
//! Devices never touch caller memory directly. They go through the
//! [`UserReader`] and [`UserWriter`] capabilities, which either move the
//! requested bytes completely or fail with
//! [`DevError::TransferFault`](slate_core::DevError::TransferFault);
//! there are no observable partial transfers. This mirrors the
//! all-or-nothing contract of a kernel's user-copy primitives, where a
//! nonzero residue is reported to the driver as a fault.
//!
//! ## Implementations
//!
//! - [`UserSlice`] / [`UserSliceMut`]: safe slice-backed carriers for
//!   hosted callers and tests
//! - `FaultyReader` / `FaultyWriter` (feature `testing`): programmable
//!   fault injection for exercising device error paths

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

use slate_core::DevResult;

mod slice;

#[cfg(any(test, feature = "testing"))]
pub mod fault;

pub use slice::{UserSlice, UserSliceMut};

// =============================================================================
// READER CAPABILITY
// =============================================================================

/// Source of bytes crossing into the device (caller -> device).
///
/// A reader hands out its bytes in order; each successful call consumes
/// the bytes it returned. A failed call consumes nothing.
pub trait UserReader {
    /// Total bytes the caller offered.
    fn len(&self) -> usize;

    /// Whether the caller offered no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes successfully consumed so far.
    fn consumed(&self) -> usize;

    /// Fill `dst` with the next `dst.len()` bytes, all or nothing.
    ///
    /// Fails with `TransferFault` if the caller's memory cannot supply
    /// the full amount; no bytes are consumed in that case.
    fn read_exact(&mut self, dst: &mut [u8]) -> DevResult<()>;
}

// =============================================================================
// WRITER CAPABILITY
// =============================================================================

/// Destination for bytes crossing out of the device (device -> caller).
///
/// A writer accepts bytes in order; each successful call appends after
/// the bytes already written. A failed call writes nothing.
pub trait UserWriter {
    /// Total bytes the caller's buffer can accept.
    fn len(&self) -> usize;

    /// Whether the caller's buffer can accept no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes successfully written so far.
    fn written(&self) -> usize;

    /// Move all of `src` across the boundary, all or nothing.
    ///
    /// Fails with `TransferFault` if the caller's memory cannot accept
    /// the full amount; nothing is written in that case.
    fn write_all(&mut self, src: &[u8]) -> DevResult<()>;
}
