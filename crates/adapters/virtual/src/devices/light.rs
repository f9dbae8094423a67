//! Virtual light — responds to `switch_on` and `switch_off`.

use homebus_app::ports::{Device, HandlerFuture, HandlerTable};
use homebus_domain::capability::CapabilitySet;
use homebus_domain::error::DeviceError;
use homebus_domain::message::MessageKind;
use homebus_domain::state::{DeviceSnapshot, DeviceState};
use tokio::sync::Mutex;

use crate::latency::Latency;

/// A simulated light that can be switched on and off.
pub struct HueLight {
    name: String,
    latency: Latency,
    state: Mutex<DeviceState>,
    table: HandlerTable<Self>,
}

impl Default for HueLight {
    fn default() -> Self {
        Self::new("Hue Light")
    }
}

impl HueLight {
    /// A light that starts switched off and answers instantly.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latency: Latency::None,
            state: Mutex::new(DeviceState::Off),
            table: HandlerTable::new()
                .on(MessageKind::SwitchOn, switch_on)
                .on(MessageKind::SwitchOff, switch_off),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Current power state.
    pub async fn state(&self) -> DeviceState {
        *self.state.lock().await
    }

    async fn set_power(&self, target: DeviceState) -> Result<DeviceSnapshot, DeviceError> {
        let mut state = self.state.lock().await;
        self.latency.wait().await;
        *state = target;
        Ok(DeviceSnapshot::new(target))
    }
}

fn switch_on<'a>(light: &'a HueLight, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(light.set_power(DeviceState::On))
}

fn switch_off<'a>(light: &'a HueLight, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(light.set_power(DeviceState::Off))
}

impl Device for HueLight {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> CapabilitySet {
        self.table.capabilities()
    }

    fn handle<'a>(
        &'a self,
        kind: MessageKind,
        payload: Option<&'a str>,
    ) -> Option<HandlerFuture<'a>> {
        self.table.invoke(self, kind, payload)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn run(light: &HueLight, kind: MessageKind) -> Result<DeviceSnapshot, DeviceError> {
        light.handle(kind, None).unwrap().await
    }

    #[tokio::test]
    async fn should_default_to_off() {
        let light = HueLight::default();
        assert_eq!(light.name(), "Hue Light");
        assert_eq!(light.state().await, DeviceState::Off);
    }

    #[tokio::test]
    async fn should_switch_on_when_handled() {
        let light = HueLight::default();
        let snapshot = run(&light, MessageKind::SwitchOn).await.unwrap();
        assert_eq!(snapshot.state, DeviceState::On);
        assert_eq!(light.state().await, DeviceState::On);
    }

    #[tokio::test]
    async fn should_switch_off_after_switch_on() {
        let light = HueLight::default();
        run(&light, MessageKind::SwitchOn).await.unwrap();
        let snapshot = run(&light, MessageKind::SwitchOff).await.unwrap();
        assert_eq!(snapshot.state, DeviceState::Off);
    }

    #[test]
    fn should_only_accept_power_commands() {
        let light = HueLight::default();
        let caps = light.capabilities();
        assert_eq!(caps.len(), 2);
        assert!(caps.contains(MessageKind::SwitchOn));
        assert!(caps.contains(MessageKind::SwitchOff));
        assert!(light.handle(MessageKind::Flush, None).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn should_apply_effect_only_after_latency() {
        let light = HueLight::default().with_latency(Latency::Fixed(Duration::from_millis(500)));
        let mut pending = light.handle(MessageKind::SwitchOn, None).unwrap();

        let early = tokio::time::timeout(Duration::from_millis(100), &mut pending).await;
        assert!(early.is_err());
        drop(pending);

        // dropped mid-latency: nothing applied
        assert_eq!(light.state().await, DeviceState::Off);
    }
}
