//! Virtual device implementations — light, speaker, toilet.
//!
//! Each device keeps a [`HandlerTable`](homebus_app::ports::HandlerTable)
//! built once at construction and delegates the
//! [`Device`](homebus_app::ports::Device) port to it.

mod light;
mod speaker;
mod toilet;

pub use light::HueLight;
pub use speaker::SmartSpeaker;
pub use toilet::{DEFAULT_RESERVOIR, SmartToilet};
