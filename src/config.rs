//! Launch configuration and home-directory resolution.

use crate::DYNAMODB_HOME_ENV;
use crate::error::instance::InstanceError;
use crate::error::location::ErrorLocation;
use crate::port::PortAllocator;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

/// How long `start` waits for the emulator port to accept a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-call configuration for [`DynamoDb::start_with`](crate::DynamoDb::start_with).
///
/// Everything here used to be process-global state in older fixtures of
/// this kind (a log flag that had to be set before the first start, a
/// mutable timeout). Passing it explicitly removes the ordering
/// requirement and lets tests inject a deterministic [`PortAllocator`].
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Forward each line of the child's stderr through `log`, tagged with
    /// the allocated port.
    pub log_output: bool,

    /// Overall readiness deadline; the connect poll is abandoned and the
    /// child killed once it elapses.
    pub connect_timeout: Duration,

    /// Port source for this launch. `None` uses the process-wide shared
    /// allocator.
    pub allocator: Option<Arc<PortAllocator>>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            log_output: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            allocator: None,
        }
    }
}

/// Resolve the DynamoDB Local home directory from `DYNAMODB_TEST_PATH`.
///
/// A `.env` file is honored if present (variables already in the
/// environment win). If the value is a colon-separated list, the first
/// component is used. Fails with [`InstanceError::Config`] when the
/// variable is unset or empty.
#[track_caller]
pub fn resolve_home() -> Result<PathBuf, InstanceError> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded env file from {}", path.display());
    }

    let raw = env::var(DYNAMODB_HOME_ENV).unwrap_or_default();
    let first = raw.split(':').next().unwrap_or_default();

    if first.is_empty() {
        return Err(InstanceError::Config {
            message: format!("{DYNAMODB_HOME_ENV} must be set"),
            location: ErrorLocation::caller(),
        });
    }

    Ok(PathBuf::from(first))
}
