//! Virtual speaker — `switch_on`, `switch_off` and `play_song`.

use homebus_app::ports::{Device, HandlerFuture, HandlerTable};
use homebus_domain::capability::CapabilitySet;
use homebus_domain::error::DeviceError;
use homebus_domain::message::MessageKind;
use homebus_domain::state::{AttributeValue, DeviceSnapshot, DeviceState};
use tokio::sync::Mutex;

use crate::latency::Latency;

#[derive(Debug, Default)]
struct SpeakerState {
    powered: bool,
    song: Option<String>,
}

impl SpeakerState {
    fn snapshot(&self) -> DeviceSnapshot {
        match (&self.song, self.powered) {
            (Some(song), true) => DeviceSnapshot::new(DeviceState::Playing)
                .with_attribute("song", AttributeValue::String(song.clone())),
            (_, true) => DeviceSnapshot::new(DeviceState::On),
            (_, false) => DeviceSnapshot::new(DeviceState::Off),
        }
    }
}

/// A simulated smart speaker.
///
/// Playing requires the speaker to be on and a song title as payload.
/// Switching off stops playback.
pub struct SmartSpeaker {
    name: String,
    latency: Latency,
    state: Mutex<SpeakerState>,
    table: HandlerTable<Self>,
}

impl Default for SmartSpeaker {
    fn default() -> Self {
        Self::new("Smart Speaker")
    }
}

impl SmartSpeaker {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latency: Latency::None,
            state: Mutex::new(SpeakerState::default()),
            table: HandlerTable::new()
                .on(MessageKind::SwitchOn, switch_on)
                .on(MessageKind::SwitchOff, switch_off)
                .on(MessageKind::PlaySong, play_song),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Current snapshot, including the song being played if any.
    pub async fn snapshot(&self) -> DeviceSnapshot {
        self.state.lock().await.snapshot()
    }

    async fn set_power(&self, powered: bool) -> Result<DeviceSnapshot, DeviceError> {
        let mut state = self.state.lock().await;
        self.latency.wait().await;
        state.powered = powered;
        if !powered {
            state.song = None;
        }
        Ok(state.snapshot())
    }

    async fn play(&self, song: Option<&str>) -> Result<DeviceSnapshot, DeviceError> {
        let song = song.ok_or(DeviceError::MissingPayload {
            kind: MessageKind::PlaySong,
        })?;
        let mut state = self.state.lock().await;
        if !state.powered {
            return Err(DeviceError::PoweredOff);
        }
        self.latency.wait().await;
        state.song = Some(song.to_string());
        Ok(state.snapshot())
    }
}

fn switch_on<'a>(speaker: &'a SmartSpeaker, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(speaker.set_power(true))
}

fn switch_off<'a>(speaker: &'a SmartSpeaker, _payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(speaker.set_power(false))
}

fn play_song<'a>(speaker: &'a SmartSpeaker, payload: Option<&'a str>) -> HandlerFuture<'a> {
    Box::pin(speaker.play(payload))
}

impl Device for SmartSpeaker {
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
