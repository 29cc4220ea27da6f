//! # Slate Membuf Driver
//!
//! A fixed-capacity, memory-backed character device. The whole device is a
//! byte buffer: writes land at the session cursor until the buffer is full,
//! reads drain from the cursor until it reaches the end. Nothing persists
//! beyond the module's lifetime.
//!
//! Bringing one up takes a registry and a config:
//!
//! ```
//! use slate_chardev::{DeviceOps, DeviceRegistry, OpenFlags};
//! use slate_membuf::{MembufConfig, MembufModule};
//! use slate_uaccess::UserSlice;
//!
//! let registry = DeviceRegistry::new();
//! let module = MembufModule::install(&registry, MembufConfig::default()).unwrap();
//!
//! let ops = registry.ops(module.device_number()).unwrap();
//! let mut session = ops.open(OpenFlags::WRITE).unwrap();
//! let moved = ops.write(&mut session, &mut UserSlice::new(b"hello"), 5).unwrap();
//! assert_eq!(moved, 5);
//! ops.release(session).unwrap();
//! ```
//!
//! Install is two-phase: the device identity is acquired first, then the
//! store is allocated and the operation table bound. A failure in the later
//! phases releases the identity before the error surfaces, so a failed
//! install never wedges the device name.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// =============================================================================
// MODULE EXPORTS
// =============================================================================

pub mod config;
pub mod device;
pub mod module;

// Re-exports for convenience
pub use config::{MembufConfig, MEMBUF_CAPACITY};
pub use device::{DeviceStats, MembufDevice};
pub use module::MembufModule;
