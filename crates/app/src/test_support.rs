//! In-test devices shared by the app unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use homebus_domain::capability::CapabilitySet;
use homebus_domain::error::DeviceError;
use homebus_domain::message::MessageKind;
use homebus_domain::state::{AttributeValue, DeviceSnapshot, DeviceState};

use crate::ports::{Device, HandlerFuture, HandlerTable};

/// A lamp that switches on/off after `delay` and records every handler run.
pub struct FakeLamp {
    name: String,
    delay: Duration,
    on: AtomicBool,
    calls: AtomicUsize,
    journal: Arc<Mutex<Vec<String>>>,
    table: HandlerTable<Self>,
}

impl FakeLamp {
    pub fn new(name: &str, delay: Duration) -> Self {
        Self::sharing_journal(name, delay, &Arc::new(Mutex::new(Vec::new())))
    }

    /// Same as [`new`](Self::new), but handler runs are appended to `journal`.
    pub fn sharing_journal(name: &str, delay: Duration, journal: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            delay,
            on: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            journal: Arc::clone(journal),
            table: HandlerTable::new()
                .on(MessageKind::SwitchOn, switch_on)
                .on(MessageKind::SwitchOff, switch_off)
                .on(MessageKind::Clean, always_fail),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    fn note(&self, entry: &str) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{entry}", self.name));
    }

    async fn set_power(&self, on: bool) -> Result<DeviceSnapshot, DeviceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.note("start");
        tokio::time::sleep(self.delay).await;
        self.on.store(on, Ordering::SeqCst);
        self.note("end");
        let state = if on { DeviceState::On } else { DeviceState::Off };
        Ok(DeviceSnapshot::new(state)
            .with_attribute("name", AttributeValue::String(self.name.clone())))
    }
}

fn switch_on<'a>(lamp: &'a FakeLamp, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(lamp.set_power(true))
}

fn switch_off<'a>(lamp: &'a FakeLamp, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(lamp.set_power(false))
}

fn always_fail<'a>(lamp: &'a FakeLamp, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(async move {
        lamp.calls.fetch_add(1, Ordering::SeqCst);
        lamp.note("fail");
        Err(DeviceError::PoweredOff)
    })
}

impl Device for FakeLamp {
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

/// A device whose declared capabilities include a kind it has no handler for.
pub struct LyingDevice;

impl Device for LyingDevice {
    fn name(&self) -> &str {
        "Liar"
    }

    fn capabilities(&self) -> CapabilitySet {
        [MessageKind::Flush].into_iter().collect()
    }

    fn handle<'a>(
        &'a self,
        _kind: MessageKind,
        _payload: Option<&'a str>,
    ) -> Option<HandlerFuture<'a>> {
        None
    }
}
