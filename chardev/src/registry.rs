//! # Device Registry
//!
//! Manages device identities and the binding of operation tables to them.
//!
//! A driver acquires a major/minor region under a unique name, binds its
//! [`DeviceOps`] table to that region, and releases the region when it goes
//! away. The host side resolves a [`DeviceNumber`] to the bound table with
//! [`DeviceRegistry::ops`].

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;

use spin::RwLock;

use slate_core::{DevError, DevRegion, DevResult, DeviceNumber, RegistrationError};

use crate::ops::DeviceOps;

/// Highest major number handed out dynamically.
pub const DYNAMIC_MAJOR_MAX: u32 = 254;

/// Lowest major number handed out dynamically.
pub const DYNAMIC_MAJOR_MIN: u32 = 234;

/// Registry entry for one acquired region.
struct RegionEntry {
    /// Name the region was acquired under
    name: String,
    /// The region descriptor handed to the owner
    region: DevRegion,
    /// Bound operation table, if any
    ops: Option<Arc<dyn DeviceOps>>,
}

/// Device registry.
///
/// Regions are keyed by major; names are tracked separately for collision
/// checks and lookup.
pub struct DeviceRegistry {
    /// Acquired regions (keyed by major)
    regions: RwLock<BTreeMap<u32, RegionEntry>>,
    /// Acquired names (for collision checks and dynamic lookup)
    names: RwLock<BTreeMap<String, u32>>,
}

impl DeviceRegistry {
    /// Create a new, empty registry.
    pub const fn new() -> Self {
        Self {
            regions: RwLock::new(BTreeMap::new()),
            names: RwLock::new(BTreeMap::new()),
        }
    }

    /// Acquire a device identity under `name`.
    ///
    /// Hands out one dynamically-chosen major with `minor_count` minors
    /// starting at zero. Majors are assigned descending from
    /// [`DYNAMIC_MAJOR_MAX`]; when none is free the registry is exhausted.
    pub fn acquire(&self, name: &str, minor_count: u32) -> DevResult<DevRegion> {
        if name.is_empty() || minor_count == 0 {
            return Err(DevError::InvalidArgument);
        }

        let mut names = self.names.write();
        if names.contains_key(name) {
            return Err(RegistrationError::NameTaken.into());
        }

        let mut regions = self.regions.write();
        let major = match (DYNAMIC_MAJOR_MIN..=DYNAMIC_MAJOR_MAX)
            .rev()
            .find(|major| !regions.contains_key(major))
        {
            Some(major) => major,
            None => return Err(RegistrationError::Exhausted.into()),
        };

        let region = DevRegion::new(major, 0, minor_count);
        regions.insert(
            major,
            RegionEntry {
                name: name.to_string(),
                region,
                ops: None,
            },
        );
        drop(regions);

        names.insert(name.to_string(), major);
        drop(names);

        log::info!("Registry: acquired {} for '{}'", region, name);
        Ok(region)
    }

    /// Bind an operation table to an acquired region.
    ///
    /// Exactly one bind per acquire; the handle must be the one `acquire`
    /// returned.
    pub fn bind(&self, region: DevRegion, ops: Arc<dyn DeviceOps>) -> DevResult<()> {
        let mut regions = self.regions.write();
        let entry = match regions.get_mut(&region.major) {
            Some(entry) if entry.region == region => entry,
            _ => return Err(RegistrationError::UnknownRegion.into()),
        };
        if entry.ops.is_some() {
            return Err(RegistrationError::AlreadyBound.into());
        }

        entry.ops = Some(ops);
        let name = entry.name.clone();
        drop(regions);

        log::info!("Registry: bound operations for '{}' ({})", name, region);
        Ok(())
    }

    /// Release an acquired region, returning its major to the pool.
    ///
    /// The binding, if any, is removed first; the operation table is freed
    /// once its last owner drops it. Releasing a region that is not current
    /// fails with [`RegistrationError::UnknownRegion`], which also makes a
    /// double release a typed error rather than silent corruption.
    pub fn release(&self, region: DevRegion) -> DevResult<()> {
        let mut regions = self.regions.write();
        let entry = match regions.remove(&region.major) {
            Some(entry) if entry.region == region => entry,
            Some(other) => {
                // Stale handle for a live major; put the entry back untouched.
                regions.insert(region.major, other);
                return Err(RegistrationError::UnknownRegion.into());
            }
            None => return Err(RegistrationError::UnknownRegion.into()),
        };
        drop(regions);

        self.names.write().remove(&entry.name);
        log::info!("Registry: released {} ('{}')", region, entry.name);
        Ok(())
    }

    /// Resolve a device number to its bound operation table.
    pub fn ops(&self, device: DeviceNumber) -> Option<Arc<dyn DeviceOps>> {
        let regions = self.regions.read();
        let entry = regions.get(&device.major)?;
        if entry.region.contains(device.minor) {
            entry.ops.clone()
        } else {
            None
        }
    }

    /// Look up a region by the name it was acquired under.
    pub fn lookup(&self, name: &str) -> Option<DevRegion> {
        let major = *self.names.read().get(name)?;
        self.regions.read().get(&major).map(|entry| entry.region)
    }

    /// Whether `name` is currently acquired.
    pub fn contains(&self, name: &str) -> bool {
        self.names.read().contains_key(name)
    }

    /// Number of currently acquired regions.
    pub fn count(&self) -> usize {
        self.regions.read().len()
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// GLOBAL REGISTRY
// =============================================================================

/// Global device registry
static REGISTRY: DeviceRegistry = DeviceRegistry::new();

/// Get the global device registry.
pub fn registry() -> &'static DeviceRegistry {
    &REGISTRY
}

/// Resolve a device number against the global registry (convenience
/// function).
pub fn ops(device: DeviceNumber) -> Option<Arc<dyn DeviceOps>> {
    REGISTRY.ops(device)
}

// =============================================================================
// COMPILE-TIME GUARANTEES
// =============================================================================

static_assertions::assert_impl_all!(DeviceRegistry: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
