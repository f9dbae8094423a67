//! Device registry — assigns identities and owns the identity → device map.
//!
//! The map is the only shared mutable structure of the bus. Every mutation
//! happens under the write lock, so concurrent registrations never hand out
//! the same [`DeviceId`] and never lose an entry. Nothing here suspends.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use homebus_domain::capability::CapabilitySet;
use homebus_domain::error::UnknownDeviceError;
use homebus_domain::id::DeviceId;

use crate::ports::Device;

/// Read-only description of a registered device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    pub id: DeviceId,
    pub name: String,
    pub capabilities: CapabilitySet,
}

/// Thread-safe identity → device mapping.
#[derive(Default)]
pub struct Registry {
    devices: RwLock<HashMap<DeviceId, Arc<dyn Device>>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `device` under a fresh identity and return it.
    ///
    /// The caller may keep its own `Arc` to the device; the registry only
    /// shares ownership.
    #[tracing::instrument(skip_all, fields(device = device.name()))]
    pub fn register<D: Device + 'static>(&self, device: Arc<D>) -> DeviceId {
        let mut devices = self.devices.write().unwrap_or_else(PoisonError::into_inner);
        let id = loop {
            let candidate = DeviceId::new();
            if !devices.contains_key(&candidate) {
                break candidate;
            }
        };
        devices.insert(id, device);
        tracing::debug!(device_id = %id, "device registered");
        id
    }

    /// Look up the device registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDeviceError`] when `id` was never registered or has
    /// been unregistered.
    pub fn resolve(&self, id: DeviceId) -> Result<Arc<dyn Device>, UnknownDeviceError> {
        self.devices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(UnknownDeviceError { device_id: id })
    }

    /// Remove the device registered under `id` and hand it back.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDeviceError`] when `id` is not registered.
    #[tracing::instrument(skip(self))]
    pub fn unregister(&self, id: DeviceId) -> Result<Arc<dyn Device>, UnknownDeviceError> {
        self.devices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or(UnknownDeviceError { device_id: id })
    }

    #[must_use]
    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describe every registered device, sorted by name then id.
    #[must_use]
    pub fn list(&self) -> Vec<DeviceSummary> {
        let mut summaries: Vec<DeviceSummary> = self
            .devices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, device)| DeviceSummary {
                id: *id,
                name: device.name().to_string(),
                capabilities: device.capabilities(),
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        summaries
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use homebus_domain::message::MessageKind;

    use super::*;
    use crate::test_support::FakeLamp;

    fn lamp(name: &str) -> Arc<FakeLamp> {
        Arc::new(FakeLamp::new(name, Duration::ZERO))
    }

    #[test]
    fn should_resolve_registered_device() {
        let registry = Registry::new();
        let id = registry.register(lamp("Desk"));

        let device = registry.resolve(id).unwrap();
        assert_eq!(device.name(), "Desk");
        assert!(registry.contains(id));
    }

    #[test]
    fn should_share_the_exact_device_instance() {
        let registry = Registry::new();
        let desk = lamp("Desk");
        let id = registry.register(Arc::clone(&desk));

        let resolved = registry.resolve(id).unwrap();
        let resolved_ptr = Arc::as_ptr(&resolved).cast::<()>();
        assert_eq!(resolved_ptr, Arc::as_ptr(&desk).cast::<()>());
    }

    #[test]
    fn should_return_unknown_device_when_id_never_registered() {
        let registry = Registry::new();
        registry.register(lamp("Desk"));

        let missing = DeviceId::new();
        let result = registry.resolve(missing);
        assert_eq!(
            result.err(),
            Some(UnknownDeviceError { device_id: missing })
        );
    }

    #[test]
    fn should_assign_distinct_ids_to_each_device() {
        let registry = Registry::new();
        let a = registry.register(lamp("A"));
        let b = registry.register(lamp("B"));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn should_assign_unique_ids_under_concurrent_registration() {
        let registry = Arc::new(Registry::new());

        let handles: Vec<_> = (0..64)
            .map(|idx| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.register(lamp(&format!("lamp-{idx}"))) })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(registry.len(), 64);
        for id in ids {
            assert!(registry.resolve(id).is_ok());
        }
    }

    #[test]
    fn should_forget_device_after_unregister() {
        let registry = Registry::new();
        let id = registry.register(lamp("Desk"));

        let removed = registry.unregister(id).unwrap();
        assert_eq!(removed.name(), "Desk");
        assert!(registry.is_empty());
        assert!(registry.resolve(id).is_err());
        assert!(registry.unregister(id).is_err());
    }

    #[test]
    fn should_list_devices_sorted_by_name() {
        let registry = Registry::new();
        registry.register(lamp("Porch"));
        registry.register(lamp("Attic"));

        let names: Vec<_> = registry.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Attic", "Porch"]);
    }

    #[test]
    fn should_list_capabilities_of_each_device() {
        let registry = Registry::new();
        let id = registry.register(lamp("Desk"));

        let summary = &registry.list()[0];
        assert_eq!(summary.id, id);
        assert!(summary.capabilities.contains(MessageKind::SwitchOn));
        assert!(!summary.capabilities.contains(MessageKind::PlaySong));
    }
}
