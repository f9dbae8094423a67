//! Error taxonomy for registration, dispatch and batch execution.
//!
//! Each failure mode has its own typed error; [`DispatchError`] is what
//! `send` returns and converts from each of them via `#[from]`.

use crate::id::DeviceId;
use crate::message::MessageKind;

/// The targeted identity is not (or no longer) registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no device registered under {device_id}")]
pub struct UnknownDeviceError {
    pub device_id: DeviceId,
}

/// The device exists but its capability set excludes the message kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {device} ({device_id}) does not support {kind}")]
pub struct UnsupportedCommandError {
    pub device_id: DeviceId,
    pub device: String,
    pub kind: MessageKind,
}

/// Failure raised by a device handler itself.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The water reservoir has no flush left.
    #[error("reservoir is empty")]
    ReservoirEmpty,

    /// The command needs a payload and none was given.
    #[error("{kind} requires a payload")]
    MissingPayload { kind: MessageKind },

    /// The device must be switched on first.
    #[error("device is switched off")]
    PoweredOff,

    /// Any other device-specific failure.
    #[error("device failure")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A handler failure, tagged with where it happened.
#[derive(Debug, thiserror::Error)]
#[error("device {device_id} failed to execute {kind}")]
pub struct DeviceExecutionError {
    pub device_id: DeviceId,
    pub kind: MessageKind,
    #[source]
    pub source: DeviceError,
}

/// Everything `send` can fail with.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownDevice(#[from] UnknownDeviceError),

    #[error(transparent)]
    UnsupportedCommand(#[from] UnsupportedCommandError),

    #[error(transparent)]
    DeviceExecution(#[from] DeviceExecutionError),

    /// The caller cancelled before the handler started.
    #[error("dispatch cancelled before the handler started")]
    Cancelled,
}

/// One or more operations of a parallel batch failed.
///
/// Every failure is kept together with its position in the batch.
#[derive(Debug, thiserror::Error)]
#[error("{} operations failed, {} succeeded", .failures.len(), .succeeded)]
pub struct AggregateExecutionError {
    pub failures: Vec<(usize, DispatchError)>,
    pub succeeded: usize,
}

impl AggregateExecutionError {
    /// Iterate over the individual errors, in batch order.
    pub fn errors(&self) -> impl Iterator<Item = &DispatchError> {
        self.failures.iter().map(|(_, err)| err)
    }
}

/// A string that names none of the [`MessageKind`] variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message kind: {0}")]
pub struct UnknownMessageKindError(pub String);

/// Invariant violations when building domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("routine must contain at least one step")]
    NoSteps,

    #[error("step {index} has no message")]
    EmptyStep { index: usize },
}
