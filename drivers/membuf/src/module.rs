//! Module lifecycle: two-phase install with rollback, teardown by drop.
//!
//! Install runs acquire, allocate, bind, in that order. A failure at any
//! point unwinds everything done so far through the registration guard; a
//! failed install leaves the registry exactly as it found it.

use alloc::string::String;
use alloc::sync::Arc;

use slate_chardev::{BackingStore, DeviceRegistry, Registration};
use slate_core::{DevRegion, DevResult, DeviceNumber};

use crate::config::MembufConfig;
use crate::device::{DeviceStats, MembufDevice};

/// An installed membuf instance, bound into a registry for its lifetime.
///
/// Dropping the module tears everything down in reverse install order.
#[derive(Debug)]
pub struct MembufModule<'r> {
    // Field order is load-bearing: the module's device handle must drop
    // before the registration removes the registry's handle, so the store
    // is freed exactly once, at unbind.
    device: Arc<MembufDevice>,
    registration: Registration<'r>,
    name: String,
}

impl<'r> MembufModule<'r> {
    /// Bring a device up in `registry` per `config`.
    ///
    /// On any failure the region acquired so far is released before the
    /// error reaches the caller; the name is immediately reusable.
    pub fn install(registry: &'r DeviceRegistry, config: MembufConfig) -> DevResult<Self> {
        config.validate()?;

        let mut registration = Registration::acquire(registry, &config.name, config.minors)?;
        let store = BackingStore::allocate(config.capacity)?;
        let device = Arc::new(MembufDevice::new(
            registration.device_number(),
            store,
            config.mode,
        ));
        registration.bind(device.clone())?;

        log::info!(
            "Membuf: installed '{}' as {} ({} bytes, {:?})",
            config.name,
            registration.device_number(),
            config.capacity,
            config.mode
        );
        Ok(Self {
            device,
            registration,
            name: config.name,
        })
    }

    /// Tear the device down now instead of at end of scope.
    ///
    /// Equivalent to dropping the module.
    pub fn uninstall(self) {}

    /// First device number of the installed region.
    #[inline]
    pub fn device_number(&self) -> DeviceNumber {
        self.registration.device_number()
    }

    /// The installed region.
    #[inline]
    pub fn region(&self) -> DevRegion {
        self.registration.region()
    }

    /// Handle on the device instance.
    pub fn device(&self) -> Arc<MembufDevice> {
        self.device.clone()
    }

    /// Snapshot of the device's lifetime counters.
    pub fn stats(&self) -> DeviceStats {
        self.device.stats()
    }
}

// Teardown logs here so an end-of-scope drop and an explicit uninstall
// report the same way. The fields unwind right after this runs.
impl Drop for MembufModule<'_> {
    fn drop(&mut self) {
        log::info!(
            "Membuf: removing '{}' ({})",
            self.name,
            self.registration.device_number()
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use alloc::format;

    use slate_chardev::{DeviceOps, OpenFlags, TransferMode};
    use slate_core::{DevError, RegistrationError};
    use slate_uaccess::{UserSlice, UserSliceMut};

    use super::*;

    #[test]
    fn test_install_defaults() {
        let registry = DeviceRegistry::new();
        let module = MembufModule::install(&registry, MembufConfig::default()).unwrap();

        assert!(registry.contains("membuf"));
        assert_eq!(module.region().count, 1);
        assert_eq!(module.device().capacity(), 1024);
        assert!(registry.ops(module.device_number()).is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let registry = DeviceRegistry::new();
        let config = MembufConfig {
            capacity: 0,
            ..MembufConfig::default()
        };

        let err = MembufModule::install(&registry, config).unwrap_err();
        assert_eq!(err, DevError::InvalidArgument);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_name_collision() {
        let registry = DeviceRegistry::new();
        let _first = MembufModule::install(&registry, MembufConfig::default()).unwrap();

        let err = MembufModule::install(&registry, MembufConfig::default()).unwrap_err();
        assert_eq!(err, DevError::Registration(RegistrationError::NameTaken));
    }

    #[test]
    fn test_alloc_failure_rolls_back() {
        let registry = DeviceRegistry::new();
        let config = MembufConfig {
            capacity: usize::MAX,
            ..MembufConfig::named("rollback")
        };

        let err = MembufModule::install(&registry, config).unwrap_err();
        assert_eq!(err, DevError::OutOfMemory);

        // The acquire was undone; the same name installs cleanly.
        assert!(!registry.contains("rollback"));
        assert_eq!(registry.count(), 0);
        MembufModule::install(&registry, MembufConfig::named("rollback")).unwrap();
    }

    #[test]
    fn test_drop_tears_down() {
        let registry = DeviceRegistry::new();
        let device;
        {
            let module = MembufModule::install(&registry, MembufConfig::default()).unwrap();
            device = module.device_number();
        }
        assert!(!registry.contains("membuf"));
        assert!(registry.ops(device).is_none());
    }

    #[test]
    fn test_uninstall_frees_name() {
        let registry = DeviceRegistry::new();
        let module = MembufModule::install(&registry, MembufConfig::default()).unwrap();
        let device = module.device_number();
        module.uninstall();

        // Explicit uninstall leaves the registry exactly as a drop would.
        assert!(registry.ops(device).is_none());
        assert_eq!(registry.count(), 0);
        MembufModule::install(&registry, MembufConfig::default()).unwrap();
    }

    #[test]
    fn test_debug_names_instance() {
        let registry = DeviceRegistry::new();
        let module = MembufModule::install(&registry, MembufConfig::default()).unwrap();

        let rendered = format!("{module:?}");
        assert!(rendered.contains("membuf"));
        assert!(rendered.contains("MembufDevice"));
        assert!(rendered.contains("bound: true"));
    }

    #[test]
    fn test_two_modules_independent() {
        let registry = DeviceRegistry::new();
        let first_config = MembufConfig {
            capacity: 8,
            ..MembufConfig::named("first")
        };
        let second_config = MembufConfig {
            capacity: 4,
            ..MembufConfig::named("second")
        };

        let first = MembufModule::install(&registry, first_config).unwrap();
        let second = MembufModule::install(&registry, second_config).unwrap();
        assert_ne!(first.device_number(), second.device_number());

        // Fill the first device; the second stays untouched zeros.
        let first_device = first.device();
        let mut session = first_device.open(OpenFlags::WRITE).unwrap();
        first_device
            .write(&mut session, &mut UserSlice::new(&[0xFF; 8]), 8)
            .unwrap();

        let second_device = second.device();
        let mut session = second_device.open(OpenFlags::READ).unwrap();
        let mut buf = [0xAAu8; 4];
        let mut dest = UserSliceMut::new(&mut buf);
        assert_eq!(second_device.read(&mut session, &mut dest, 4).unwrap(), 4);
        assert_eq!(buf, [0, 0, 0, 0]);
    }

    #[test]
    fn test_round_trip_survives_reopen() {
        let registry = DeviceRegistry::new();
        let module = MembufModule::install(&registry, MembufConfig::default()).unwrap();
        let ops = registry.ops(module.device_number()).unwrap();
        let payload = b"sequential bytes";

        let mut session = ops.open(OpenFlags::WRITE).unwrap();
        let moved = ops
            .write(&mut session, &mut UserSlice::new(payload), payload.len())
            .unwrap();
        assert_eq!(moved, payload.len());
        ops.release(session).unwrap();

        // A fresh session starts back at offset zero and sees the bytes.
        let mut session = ops.open(OpenFlags::READ).unwrap();
        let mut buf = [0u8; 16];
        let mut dest = UserSliceMut::new(&mut buf);
        assert_eq!(
            ops.read(&mut session, &mut dest, payload.len()).unwrap(),
            payload.len()
        );
        assert_eq!(&buf, payload);
        ops.release(session).unwrap();
    }

    #[test]
    fn test_end_to_end_fill_and_drain() {
        let registry = DeviceRegistry::new();
        let module = MembufModule::install(&registry, MembufConfig::default()).unwrap();
        let ops = registry.ops(module.device_number()).unwrap();

        // Write far more than fits; exactly the capacity lands.
        let payload = [0xAAu8; 2000];
        let mut session = ops.open(OpenFlags::RDWR).unwrap();
        let moved = ops
            .write(&mut session, &mut UserSlice::new(&payload), 2000)
            .unwrap();
        assert_eq!(moved, 1024);
        ops.release(session).unwrap();

        // Drain with an oversized read; exactly the capacity comes back.
        let mut session = ops.open(OpenFlags::RDWR).unwrap();
        let mut buf = [0u8; 2000];
        let mut dest = UserSliceMut::new(&mut buf);
        let moved = ops.read(&mut session, &mut dest, 2000).unwrap();
        assert_eq!(moved, 1024);
        assert_eq!(&buf[..1024], &[0xAA; 1024][..]);
        assert_eq!(&buf[1024..], &[0; 976][..]);

        // The store is exhausted from this cursor.
        let mut tail = [0u8; 16];
        let mut dest = UserSliceMut::new(&mut tail);
        assert_eq!(ops.read(&mut session, &mut dest, 16).unwrap(), 0);
        ops.release(session).unwrap();

        let stats = module.stats();
        assert_eq!(stats.opens, 2);
        assert_eq!(stats.releases, 2);
        assert_eq!(stats.bytes_moved, 2048);
    }

    #[test]
    fn test_flat_module() {
        let registry = DeviceRegistry::new();
        let config = MembufConfig {
            mode: TransferMode::Flat,
            capacity: 8,
            ..MembufConfig::named("flat")
        };
        let module = MembufModule::install(&registry, config).unwrap();
        let ops = registry.ops(module.device_number()).unwrap();

        let mut session = ops.open(OpenFlags::RDWR).unwrap();
        ops.write(&mut session, &mut UserSlice::new(&[5, 6, 7]), 3)
            .unwrap();

        let mut buf = [0u8; 3];
        let mut dest = UserSliceMut::new(&mut buf);
        assert_eq!(ops.read(&mut session, &mut dest, 3).unwrap(), 3);
        assert_eq!(buf, [5, 6, 7]);

        let err = ops
            .read(&mut session, &mut UserSliceMut::new(&mut [0u8; 9]), 9)
            .unwrap_err();
        assert_eq!(err, DevError::InvalidArgument);
    }
}
