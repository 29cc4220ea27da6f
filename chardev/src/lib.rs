//! # Slate Character Device Core
//!
//! The character device machinery: operation tables, per-open sessions, the
//! fixed-capacity backing store, the offset-bounded transfer engine, and the
//! device registry that ties a driver's operations to a major/minor region.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       slate-chardev                          │
//! │  ┌───────────┐  ┌──────────┐  ┌─────────┐  ┌──────────────┐  │
//! │  │ Registry  │  │  Engine  │  │  Store  │  │   Session    │  │
//! │  │ (lookup,  │  │ (clamped │  │ (fixed  │  │ (cursor,     │  │
//! │  │  binding) │  │  copies) │  │  bytes) │  │  open flags) │  │
//! │  └───────────┘  └──────────┘  └─────────┘  └──────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A driver acquires a [`DevRegion`](slate_core::DevRegion) from the
//! [`DeviceRegistry`], allocates its [`BackingStore`], and binds its
//! [`DeviceOps`] table. The host then dispatches opens by device number;
//! every transfer flows through the engine, which owns the clamping and
//! cursor rules.

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

pub mod engine;
pub mod ops;
pub mod registration;
pub mod registry;
pub mod session;
pub mod store;

// Re-exports for convenience
pub use engine::TransferMode;
pub use ops::DeviceOps;
pub use registration::Registration;
pub use registry::{registry, DeviceRegistry};
pub use session::{OpenFlags, Session};
pub use store::BackingStore;
