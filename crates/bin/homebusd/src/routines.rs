//! The two demo routines run by the daemon.

use homebus_domain::error::ValidationError;
use homebus_domain::id::DeviceId;
use homebus_domain::message::{Message, MessageKind};
use homebus_domain::routine::Routine;

/// Ids of the devices the demo routines address.
#[derive(Debug, Clone, Copy)]
pub struct Household {
    pub light: DeviceId,
    pub speaker: DeviceId,
    pub toilet: DeviceId,
}

/// Light and speaker come on together, then the speaker plays `song`.
pub fn wake_up(house: &Household, song: &str) -> Result<Routine, ValidationError> {
    Routine::builder()
        .name("wake up")
        .parallel([
            Message::new(house.light, MessageKind::SwitchOn),
            Message::new(house.speaker, MessageKind::SwitchOn),
        ])
        .sequence([Message::with_payload(
            house.speaker,
            MessageKind::PlaySong,
            song,
        )])
        .build()
}

/// Everything goes off while the toilet flushes, then the toilet cleans.
pub fn sleep(house: &Household) -> Result<Routine, ValidationError> {
    Routine::builder()
        .name("sleep")
        .parallel([
            Message::new(house.light, MessageKind::SwitchOff),
            Message::new(house.speaker, MessageKind::SwitchOff),
            Message::new(house.toilet, MessageKind::Flush),
        ])
        .sequence([Message::new(house.toilet, MessageKind::Clean)])
        .build()
}
