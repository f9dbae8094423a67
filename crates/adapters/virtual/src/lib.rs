//! # homebus-adapter-virtual
//!
//! Simulated devices used by the demo daemon and by tests.
//!
//! ## Provided devices
//!
//! | Device | Accepted kinds | Behaviour |
//! |--------|----------------|-----------|
//! | [`HueLight`] | `switch_on`, `switch_off` | Toggles its power state |
//! | [`SmartSpeaker`] | `switch_on`, `switch_off`, `play_song` | Plays the payload song; must be on |
//! | [`SmartToilet`] | `flush`, `clean` | Each flush drains one unit of the reservoir; fails when empty |
//!
//! Every handler waits for a sampled [`Latency`] before applying its effect,
//! while holding the device lock, so two messages to the same device never
//! interleave.
//!
//! ## Dependency rule
//!
//! Depends on `homebus-app` (port traits) and `homebus-domain` only.

mod devices;
mod latency;

pub use devices::{DEFAULT_RESERVOIR, HueLight, SmartSpeaker, SmartToilet};
pub use latency::Latency;
