//! Per-open session state.
//!
//! A [`Session`] is created by a device's `open` and discarded by its
//! `release`. It carries the cursor that makes transfers sequential; nothing
//! in it survives across opens.

use slate_core::{DevError, DevResult, DeviceNumber};

bitflags::bitflags! {
    /// Access mode requested at open time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// Caller intends to read
        const READ = 1 << 0;
        /// Caller intends to write
        const WRITE = 1 << 1;
        /// Read and write
        const RDWR = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Ephemeral state for one open of a device.
///
/// The cursor starts at zero and only ever advances by the exact number of
/// bytes a successful transfer moved. It never exceeds the capacity of the
/// store it is cursoring over; the engine guarantees that by clamping before
/// it copies.
#[derive(Debug)]
pub struct Session {
    device: DeviceNumber,
    flags: OpenFlags,
    offset: usize,
}

impl Session {
    /// Create a session for one open of `device`.
    ///
    /// Rejects an empty access mode with [`DevError::InvalidArgument`]; a
    /// caller that asks for neither read nor write has nothing it can do
    /// with the session.
    pub fn new(device: DeviceNumber, flags: OpenFlags) -> DevResult<Self> {
        if flags.is_empty() {
            return Err(DevError::InvalidArgument);
        }
        Ok(Self {
            device,
            flags,
            offset: 0,
        })
    }

    /// Device number this session was opened against.
    #[inline]
    pub const fn device(&self) -> DeviceNumber {
        self.device
    }

    /// Access mode requested at open time.
    #[inline]
    pub const fn flags(&self) -> OpenFlags {
        self.flags
    }

    /// Current cursor position in bytes.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the session was opened for reading.
    #[inline]
    pub fn can_read(&self) -> bool {
        self.flags.contains(OpenFlags::READ)
    }

    /// Whether the session was opened for writing.
    #[inline]
    pub fn can_write(&self) -> bool {
        self.flags.contains(OpenFlags::WRITE)
    }

    /// Advance the cursor by `bytes`.
    ///
    /// Only the engine calls this, and only after a copy fully succeeded.
    #[inline]
    pub(crate) fn advance(&mut self, bytes: usize) {
        self.offset += bytes;
    }
}

// =============================================================================
// COMPILE-TIME GUARANTEES
// =============================================================================

static_assertions::assert_impl_all!(Session: Send);
static_assertions::const_assert_eq!(OpenFlags::RDWR.bits(), 0b11);

// =============================================================================
// Tests
// =============================================================================
