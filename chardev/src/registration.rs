//! Scoped device registration.

use core::fmt;

use alloc::sync::Arc;

use slate_core::{DevRegion, DevResult, DeviceNumber};

use crate::ops::DeviceOps;
use crate::registry::DeviceRegistry;

/// A device registration that cleans up after itself.
///
/// Acquiring through this type ties the region to a value. If driver
/// initialization fails after the acquire (store allocation, any later
/// step), dropping the guard releases the region and nothing stays
/// registered. Dropping after a successful [`bind`](Registration::bind)
/// tears down in reverse order: the registry entry goes away, which drops
/// the registry's handle on the operation table, and the major returns to
/// the pool.
pub struct Registration<'r> {
    registry: &'r DeviceRegistry,
    region: DevRegion,
    bound: bool,
}

impl<'r> Registration<'r> {
    /// Acquire `name` with `minor_count` minors, scoped to the returned
    /// guard.
    pub fn acquire(registry: &'r DeviceRegistry, name: &str, minor_count: u32) -> DevResult<Self> {
        let region = registry.acquire(name, minor_count)?;
        Ok(Self {
            registry,
            region,
            bound: false,
        })
    }

    /// The acquired region.
    #[inline]
    pub const fn region(&self) -> DevRegion {
        self.region
    }

    /// First device number of the region.
    #[inline]
    pub const fn device_number(&self) -> DeviceNumber {
        self.region.first()
    }

    /// Whether an operation table has been bound.
    #[inline]
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    /// Bind the operation table to the region.
    pub fn bind(&mut self, ops: Arc<dyn DeviceOps>) -> DevResult<()> {
        self.registry.bind(self.region, ops)?;
        self.bound = true;
        Ok(())
    }
}

impl fmt::Debug for Registration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("region", &self.region)
            .field("bound", &self.bound)
            .finish()
    }
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        if !self.bound {
            log::warn!("Registry: rolling back unbound {}", self.region);
        }
        if let Err(err) = self.registry.release(self.region) {
            log::warn!("Registry: release of {} failed: {}", self.region, err);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use alloc::format;

    use slate_uaccess::{UserReader, UserWriter};

    use super::*;
    use crate::session::{OpenFlags, Session};
    use crate::store::BackingStore;

    struct NullOps;

    impl DeviceOps for NullOps {
        fn open(&self, flags: OpenFlags) -> DevResult<Session> {
            Session::new(DeviceNumber::new(0, 0), flags)
        }

        fn release(&self, _session: Session) -> DevResult<()> {
            Ok(())
        }

        fn read(
            &self,
            _session: &mut Session,
            _dest: &mut dyn UserWriter,
            _requested: usize,
        ) -> DevResult<usize> {
            Ok(0)
        }

        fn write(
            &self,
            _session: &mut Session,
            _src: &mut dyn UserReader,
            _requested: usize,
        ) -> DevResult<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_drop_releases() {
        let registry = DeviceRegistry::new();
        {
            let registration = Registration::acquire(&registry, "scoped", 1).unwrap();
            assert!(registry.contains("scoped"));
            assert!(!registration.is_bound());
        }
        assert!(!registry.contains("scoped"));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_bind_then_drop() {
        let registry = DeviceRegistry::new();
        let device;
        {
            let mut registration = Registration::acquire(&registry, "bound", 1).unwrap();
            registration.bind(Arc::new(NullOps)).unwrap();
            assert!(registration.is_bound());

            device = registration.device_number();
            assert!(registry.ops(device).is_some());
        }
        assert!(registry.ops(device).is_none());
        assert!(!registry.contains("bound"));
    }

    #[test]
    fn test_debug_reports_bound_state() {
        let registry = DeviceRegistry::new();
        let mut registration = Registration::acquire(&registry, "introspect", 1).unwrap();
        assert!(format!("{registration:?}").contains("bound: false"));

        registration.bind(Arc::new(NullOps)).unwrap();
        assert!(format!("{registration:?}").contains("bound: true"));
    }

    #[test]
    fn test_failed_init_rolls_back() {
        fn install(registry: &DeviceRegistry) -> DevResult<Registration<'_>> {
            let registration = Registration::acquire(registry, "fallible", 1)?;
            // An impossible allocation makes the second phase fail; the `?`
            // drops the guard and releases the region.
            let _store = BackingStore::allocate(usize::MAX)?;
            Ok(registration)
        }

        let registry = DeviceRegistry::new();
        assert!(install(&registry).is_err());
        assert!(!registry.contains("fallible"));

        // The name is free for the next attempt.
        let registration = Registration::acquire(&registry, "fallible", 1).unwrap();
        assert_eq!(registration.region().major, registry.lookup("fallible").unwrap().major);
    }
}
