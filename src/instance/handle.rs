use crate::DYNAMODB_BASE_URL;
use crate::config::LaunchOptions;
use crate::error::instance::InstanceError;
use crate::error::location::ErrorLocation;
use crate::instance::launch;

use log::{debug, info};
use tokio::process::Child as TokioChild;

/// A running DynamoDB Local instance.
///
/// Exclusively owns the child process until [`close`](Self::close) reaps
/// it. The handle stays valid after a failed close, but no operation on it
/// will succeed once the child has been reaped.
#[derive(Debug)]
pub struct DynamoDb {
    addr: String,
    port: u16,
    child: TokioChild,
}

impl DynamoDb {
    pub(crate) fn new(addr: String, port: u16, child: TokioChild) -> Self {
        Self { addr, port, child }
    }

    /// Start an instance with [`LaunchOptions::default`]: logging off,
    /// 10 s connect timeout, port from the process-wide allocator.
    ///
    /// # Errors
    ///
    /// * [`InstanceError::Config`] - `DYNAMODB_TEST_PATH` unset or empty
    /// * [`InstanceError::Spawn`] - the OS could not launch the emulator
    /// * [`InstanceError::ConnectTimeout`] - the port never became
    ///   connectable; the child has been killed
    pub async fn start() -> Result<Self, InstanceError> {
        launch::start_with(&LaunchOptions::default()).await
    }

    /// Start an instance with explicit options.
    pub async fn start_with(options: &LaunchOptions) -> Result<Self, InstanceError> {
        launch::start_with(options).await
    }

    /// The instance address, `localhost:<port>`.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// The allocated port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The child process id, if it has not been reaped yet.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// The instance endpoint, `http://localhost:<port>`.
    pub fn url(&self) -> String {
        format!("{DYNAMODB_BASE_URL}:{}", self.port)
    }

    /// Kill the child process and block until it has been reaped.
    ///
    /// The kill outcome is logged together with the pid before reaping.
    /// Not idempotent: a second call finds the child already reaped and
    /// returns [`InstanceError::Process`].
    pub async fn close(&mut self) -> Result<(), InstanceError> {
        let pid = self.child.id();
        let kill_result = self.child.start_kill();

        info!("Killing DynamoDB Local (PID: {pid:?}, kill result: {kill_result:?})");

        // Reap regardless of the kill outcome so a live child is never
        // left as a zombie.
        let wait_result = self.child.wait().await;

        if let Err(e) = kill_result {
            return Err(InstanceError::Process {
                message: format!("Failed to signal emulator (PID: {pid:?}): {e}"),
                location: ErrorLocation::caller(),
                source: Box::new(e),
            });
        }

        match wait_result {
            Ok(status) => {
                debug!("DynamoDB Local (PID: {pid:?}) exited: {status}");
                Ok(())
            }
            Err(e) => Err(InstanceError::Process {
                message: format!("Failed to reap emulator (PID: {pid:?}): {e}"),
                location: ErrorLocation::caller(),
                source: Box::new(e),
            }),
        }
    }
}
