use crate::error::location::ErrorLocation;

use serde::de::StdError;
use thiserror::Error as ThisError;

/// Errors raised while starting or stopping a DynamoDB Local instance.
///
/// Nothing here is retried internally; every variant is returned to the
/// immediate caller. A failed start never leaves a usable instance behind.
#[derive(Debug, ThisError)]
pub enum InstanceError {
    /// `DYNAMODB_TEST_PATH` is unset or empty.
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// The OS could not launch the emulator process.
    #[error("Spawn Error: {message} {location}")]
    Spawn {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The allocated port never became connectable within the timeout.
    /// The child has already been killed (best effort) when this is
    /// returned.
    #[error("Connect Timeout Error: {message} {location}")]
    ConnectTimeout {
        message: String,
        location: ErrorLocation,
    },

    /// Signaling or reaping the child failed, e.g. closing a handle whose
    /// process already exited.
    #[error("Process Error: {message} {location}")]
    Process {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}
