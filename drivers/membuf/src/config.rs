//! Device configuration.

use alloc::string::{String, ToString};

use slate_chardev::TransferMode;
use slate_core::{DevError, DevResult};

/// Default backing capacity in bytes.
pub const MEMBUF_CAPACITY: usize = 1024;

/// Everything a membuf instance needs to come up.
#[derive(Debug, Clone)]
pub struct MembufConfig {
    /// Name the device registers under
    pub name: String,
    /// Backing store capacity in bytes
    pub capacity: usize,
    /// Number of minors in the acquired region
    pub minors: u32,
    /// Transfer behavior
    pub mode: TransferMode,
}

impl MembufConfig {
    /// Configuration with `name` and everything else at the defaults.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Reject values the device cannot come up with: an empty name, a zero
    /// capacity, or a zero minor count.
    pub fn validate(&self) -> DevResult<()> {
        if self.name.is_empty() || self.capacity == 0 || self.minors == 0 {
            return Err(DevError::InvalidArgument);
        }
        Ok(())
    }
}

impl Default for MembufConfig {
    fn default() -> Self {
        Self {
            name: String::from("membuf"),
            capacity: MEMBUF_CAPACITY,
            minors: 1,
            mode: TransferMode::Seekable,
        }
    }
}

// =============================================================================
// COMPILE-TIME GUARANTEES
// =============================================================================

static_assertions::const_assert!(MEMBUF_CAPACITY > 0);

// =============================================================================
// Tests
// =============================================================================
