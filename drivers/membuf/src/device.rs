//! The memory-backed device instance.
//!
//! Each [`MembufDevice`] owns its backing store outright; two instances
//! share nothing. The store sits behind a mutex so at most one transfer
//! mutates it at a time, and the guard is held for exactly the duration of
//! the copy.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use spin::Mutex;

use slate_chardev::{engine, BackingStore, DeviceOps, OpenFlags, Session, TransferMode};
use slate_core::{DevError, DevResult, DeviceNumber};
use slate_uaccess::{UserReader, UserWriter};

// =============================================================================
// STATISTICS
// =============================================================================

/// Snapshot of a device's lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Sessions opened
    pub opens: u64,
    /// Sessions released
    pub releases: u64,
    /// Successful read calls
    pub reads: u64,
    /// Successful write calls
    pub writes: u64,
    /// Bytes moved in either direction
    pub bytes_moved: u64,
    /// Transfers that failed with a fault
    pub faults: u64,
    /// Writes rejected at full capacity
    pub capacity_rejections: u64,
}

/// Live counters behind the snapshot.
struct Counters {
    opens: AtomicU64,
    releases: AtomicU64,
    reads: AtomicU64,
    writes: AtomicU64,
    bytes_moved: AtomicU64,
    faults: AtomicU64,
    capacity_rejections: AtomicU64,
}

impl Counters {
    const fn new() -> Self {
        Self {
            opens: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            bytes_moved: AtomicU64::new(0),
            faults: AtomicU64::new(0),
            capacity_rejections: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> DeviceStats {
        DeviceStats {
            opens: self.opens.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            bytes_moved: self.bytes_moved.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
            capacity_rejections: self.capacity_rejections.load(Ordering::Relaxed),
        }
    }
}

// =============================================================================
// DEVICE
// =============================================================================

/// A fixed-capacity memory device.
///
/// Implements [`DeviceOps`] by delegating every transfer to the engine,
/// under the store mutex. Sessions opened against the same instance share
/// the store but carry independent cursors.
pub struct MembufDevice {
    number: DeviceNumber,
    mode: TransferMode,
    store: Mutex<BackingStore>,
    counters: Counters,
}

impl MembufDevice {
    /// Wrap an allocated store as a device.
    pub fn new(number: DeviceNumber, store: BackingStore, mode: TransferMode) -> Self {
        Self {
            number,
            mode,
            store: Mutex::new(store),
            counters: Counters::new(),
        }
    }

    /// Device number this instance answers to.
    #[inline]
    pub const fn number(&self) -> DeviceNumber {
        self.number
    }

    /// Transfer behavior of this instance.
    #[inline]
    pub const fn mode(&self) -> TransferMode {
        self.mode
    }

    /// Capacity of the backing store in bytes.
    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    /// Snapshot of the lifetime counters.
    pub fn stats(&self) -> DeviceStats {
        self.counters.snapshot()
    }
}

impl DeviceOps for MembufDevice {
    fn open(&self, flags: OpenFlags) -> DevResult<Session> {
        let session = Session::new(self.number, flags)?;
        self.counters.opens.fetch_add(1, Ordering::Relaxed);
        log::debug!("Membuf: {} opened ({:?})", self.number, flags);
        Ok(session)
    }

    fn release(&self, session: Session) -> DevResult<()> {
        self.counters.releases.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Membuf: {} released at offset {}",
            self.number,
            session.offset()
        );
        Ok(())
    }

    fn read(
        &self,
        session: &mut Session,
        dest: &mut dyn UserWriter,
        requested: usize,
    ) -> DevResult<usize> {
        let store = self.store.lock();
        let result = match self.mode {
            TransferMode::Seekable => engine::read(&store, session, dest, requested),
            TransferMode::Flat => engine::read_flat(&store, dest, requested),
        };
        drop(store);

        match result {
            Ok(moved) => {
                self.counters.reads.fetch_add(1, Ordering::Relaxed);
                self.counters
                    .bytes_moved
                    .fetch_add(moved as u64, Ordering::Relaxed);
                log::trace!("Membuf: {} read {} bytes", self.number, moved);
            }
            Err(DevError::TransferFault) => {
                self.counters.faults.fetch_add(1, Ordering::Relaxed);
                log::warn!("Membuf: {} read faulted", self.number);
            }
            Err(_) => {}
        }
        result
    }

    fn write(
        &self,
        session: &mut Session,
        src: &mut dyn UserReader,
        requested: usize,
    ) -> DevResult<usize> {
        let mut store = self.store.lock();
        let result = match self.mode {
            TransferMode::Seekable => engine::write(&mut store, session, src, requested),
            TransferMode::Flat => engine::write_flat(&mut store, src, requested),
        };
        drop(store);

        match result {
            Ok(moved) => {
                self.counters.writes.fetch_add(1, Ordering::Relaxed);
                self.counters
                    .bytes_moved
                    .fetch_add(moved as u64, Ordering::Relaxed);
                log::trace!("Membuf: {} wrote {} bytes", self.number, moved);
            }
            Err(DevError::TransferFault) => {
                self.counters.faults.fetch_add(1, Ordering::Relaxed);
                log::warn!("Membuf: {} write faulted", self.number);
            }
            Err(DevError::CapacityExceeded) => {
                self.counters
                    .capacity_rejections
                    .fetch_add(1, Ordering::Relaxed);
                log::debug!("Membuf: {} write rejected, store full", self.number);
            }
            Err(_) => {}
        }
        result
    }
}

// Formatting must not take the store lock, so the store stays out of the
// debug output.
impl fmt::Debug for MembufDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembufDevice")
            .field("number", &self.number)
            .field("mode", &self.mode)
            .finish()
    }
}

// =============================================================================
// COMPILE-TIME GUARANTEES
// =============================================================================

static_assertions::assert_impl_all!(MembufDevice: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
