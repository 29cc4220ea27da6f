//! # Slate Core
//!
//! Foundational types for the Slate character device framework.
//!
//! This crate defines what every other layer of the stack agrees on:
//! the error taxonomy and the device numbering scheme. It carries no
//! policy. Registries, stores, and transfer logic live in
//! `slate-chardev`; this crate only gives them a shared vocabulary.
//!
//! ## Components
//!
//! - **Errors**: the [`DevError`] taxonomy and the [`DevResult`] alias
//! - **Types**: [`DeviceNumber`] and [`DevRegion`] identity types
//!
//! ## `no_std`
//!
//! The crate is `no_std`; the `std` feature (default) is only required
//! for hosted test builds.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub mod types;

// Re-exports for convenience
pub use error::{DevError, DevResult, RegistrationError};
pub use types::{DevRegion, DeviceNumber};
