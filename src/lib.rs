//! Test-fixture launcher for DynamoDB Local.
//!
//! Spawns the Java-based DynamoDB Local emulator as a child process bound
//! to a freshly allocated port, waits for the port to accept TCP
//! connections, and hands the caller a [`DynamoDb`] handle exposing the
//! server URL and a shutdown path.
//!
//! ```no_run
//! # async fn demo() -> Result<(), dynamodb_test::InstanceError> {
//! let mut db = dynamodb_test::DynamoDb::start().await?;
//! assert!(db.url().starts_with("http://localhost:"));
//! db.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Requires the `DYNAMODB_TEST_PATH` environment variable to point at the
//! directory containing `DynamoDBLocal.jar` and `DynamoDbLocal_lib/`.

pub mod config;
pub mod error;
pub mod instance;
pub mod port;

#[cfg(test)]
mod tests;

pub use config::LaunchOptions;
pub use error::instance::InstanceError;
pub use instance::handle::DynamoDb;
pub use port::PortAllocator;

/// Name of the environment variable holding the DynamoDB Local home
/// directory (first component wins if colon-separated).
pub const DYNAMODB_HOME_ENV: &str = "DYNAMODB_TEST_PATH";

/// Jar artifact expected under the home directory.
pub const DYNAMODB_JAR: &str = "DynamoDBLocal.jar";

/// Native-library directory expected under the home directory.
pub const DYNAMODB_LIB_DIR: &str = "DynamoDbLocal_lib";

pub const DYNAMODB_HOSTNAME: &str = "localhost";
pub const DYNAMODB_BASE_URL: &str = const_format::concatcp!("http://", DYNAMODB_HOSTNAME);
