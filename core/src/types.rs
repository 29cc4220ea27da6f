//! Device numbering types.
//!
//! These types provide:
//! - Strong typing for device identities (never bare integers)
//! - The classic packed major/minor layout for host interop
//! - Range semantics for multi-minor registrations

use core::fmt;

/// Width of the minor field in the packed layout.
pub const MINOR_BITS: u32 = 20;

/// Mask covering the minor field in the packed layout.
pub const MINOR_MASK: u64 = (1 << MINOR_BITS) - 1;

// =============================================================================
// DEVICE NUMBER
// =============================================================================

/// A single device number: one major/minor pair.
///
/// The major identifies the driver to the host; the minor identifies one
/// device instance within the driver's region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceNumber {
    /// Major number (identifies the driver)
    pub major: u32,
    /// Minor number (identifies the device instance)
    pub minor: u32,
}

impl DeviceNumber {
    /// Create a new device number.
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Pack into the `major << 20 | minor` layout.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        ((self.major as u64) << MINOR_BITS) | (self.minor as u64 & MINOR_MASK)
    }

    /// Unpack from the `major << 20 | minor` layout.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            major: (raw >> MINOR_BITS) as u32,
            minor: (raw & MINOR_MASK) as u32,
        }
    }
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

// =============================================================================
// DEVICE REGION
// =============================================================================

/// A registered device identity: one major plus a contiguous minor range.
///
/// This is the opaque handle the registry hands out on acquisition and
/// expects back on release. It is unique for the lifetime of the
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DevRegion {
    /// Major number owned by this registration
    pub major: u32,
    /// First minor in the range
    pub base_minor: u32,
    /// Number of minors in the range (always at least 1)
    pub count: u32,
}

impl DevRegion {
    /// Create a new region descriptor.
    #[inline]
    pub const fn new(major: u32, base_minor: u32, count: u32) -> Self {
        Self {
            major,
            base_minor,
            count,
        }
    }

    /// First device number in the region.
    #[inline]
    pub const fn first(self) -> DeviceNumber {
        DeviceNumber::new(self.major, self.base_minor)
    }

    /// Whether `minor` falls inside this region's range.
    #[inline]
    pub const fn contains(self, minor: u32) -> bool {
        minor >= self.base_minor && minor - self.base_minor < self.count
    }

    /// Device number for the `index`-th minor, if in range.
    pub fn device_number(self, index: u32) -> Option<DeviceNumber> {
        if index < self.count {
            Some(DeviceNumber::new(self.major, self.base_minor + index))
        } else {
            None
        }
    }
}

impl fmt::Display for DevRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "major {}, minors {}..{}",
            self.major,
            self.base_minor,
            self.base_minor + self.count
        )
    }
}

// =============================================================================
// COMPILE-TIME GUARANTEES
// =============================================================================

static_assertions::assert_impl_all!(DeviceNumber: Send, Sync, Copy);
static_assertions::assert_impl_all!(DevRegion: Send, Sync, Copy);

// =============================================================================
// Tests
// =============================================================================
