//! Virtual toilet — `flush` and `clean`.

use homebus_app::ports::{Device, HandlerFuture, HandlerTable};
use homebus_domain::capability::CapabilitySet;
use homebus_domain::error::DeviceError;
use homebus_domain::message::MessageKind;
use homebus_domain::state::{AttributeValue, DeviceSnapshot, DeviceState};
use tokio::sync::Mutex;

use crate::latency::Latency;

/// Flushes available to a toilet built with [`SmartToilet::new`].
pub const DEFAULT_RESERVOIR: u32 = 10;

#[derive(Debug)]
struct ToiletState {
    status: DeviceState,
    reservoir: u32,
}

impl ToiletState {
    fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot::new(self.status)
            .with_attribute("reservoir", AttributeValue::Int(i64::from(self.reservoir)))
    }
}

/// A simulated smart toilet.
///
/// Every flush drains one unit of the reservoir; flushing an empty reservoir
/// fails with [`DeviceError::ReservoirEmpty`] and leaves the state untouched.
pub struct SmartToilet {
    name: String,
    latency: Latency,
    state: Mutex<ToiletState>,
    table: HandlerTable<Self>,
}

impl Default for SmartToilet {
    fn default() -> Self {
        Self::new("Smart Toilet")
    }
}

impl SmartToilet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latency: Latency::None,
            state: Mutex::new(ToiletState {
                status: DeviceState::Unknown,
                reservoir: DEFAULT_RESERVOIR,
            }),
            table: HandlerTable::new()
                .on(MessageKind::Flush, flush)
                .on(MessageKind::Clean, clean),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the number of flushes left.
    #[must_use]
    pub fn with_reservoir(mut self, reservoir: u32) -> Self {
        self.state.get_mut().reservoir = reservoir;
        self
    }

    pub async fn state(&self) -> DeviceState {
        self.state.lock().await.status
    }

    pub async fn reservoir(&self) -> u32 {
        self.state.lock().await.reservoir
    }

    async fn flush(&self) -> Result<DeviceSnapshot, DeviceError> {
        let mut state = self.state.lock().await;
        if state.reservoir == 0 {
            return Err(DeviceError::ReservoirEmpty);
        }
        self.latency.wait().await;
        state.reservoir -= 1;
        state.status = DeviceState::Flushed;
        Ok(state.snapshot())
    }

    async fn clean(&self) -> Result<DeviceSnapshot, DeviceError> {
        let mut state = self.state.lock().await;
        self.latency.wait().await;
        state.status = DeviceState::Clean;
        Ok(state.snapshot())
    }
}

fn flush<'a>(toilet: &'a SmartToilet, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(toilet.flush())
}

fn clean<'a>(toilet: &'a SmartToilet, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(toilet.clean())
}

impl Device for SmartToilet {
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
