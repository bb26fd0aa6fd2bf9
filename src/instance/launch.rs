use crate::config::{LaunchOptions, resolve_home};
use crate::error::instance::InstanceError;
use crate::error::location::ErrorLocation;
use crate::instance::handle::DynamoDb;
use crate::{DYNAMODB_HOSTNAME, DYNAMODB_JAR, DYNAMODB_LIB_DIR, port};

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use log::{debug, info, trace, warn};
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::process::Child as TokioChild;
use tokio::process::Command as TokioCommand;
use tokio::spawn as TokioSpawn;
use tokio::time::interval;
use tokio::time::timeout;

const JAVA_BINARY: &str = "java";
const LIBRARY_PATH_FLAG: &str = "-Djava.library.path=";
const JAR_FLAG: &str = "-jar";
const PORT_FLAG: &str = "-port";
const IN_MEMORY_FLAG: &str = "-inMemory";
const CONNECT_POLL_INTERVAL: Duration = Duration::from_millis(10);
const LOG_TAG: &str = "dynamodb-test";

pub(crate) fn build_launch_command(home: &Path, port: u16, pipe_stderr: bool) -> TokioCommand {
    let mut cmd = TokioCommand::new(JAVA_BINARY);
    cmd.arg(format!(
        "{LIBRARY_PATH_FLAG}{}",
        home.join(DYNAMODB_LIB_DIR).display()
    ))
    .arg(JAR_FLAG)
    .arg(home.join(DYNAMODB_JAR))
    .arg(PORT_FLAG)
    .arg(port.to_string())
    .arg(IN_MEMORY_FLAG);

    // Without forwarding the child inherits our stderr, matching what a
    // test run would show anyway.
    if pipe_stderr {
        cmd.stderr(Stdio::piped());
    }

    cmd
}

/// Launch DynamoDB Local and wait for its port to accept connections.
///
/// Allocates a port, spawns the emulator jar in in-memory mode, optionally
/// forwards its stderr through `log`, then polls a TCP connect every 10 ms
/// until success or `options.connect_timeout` elapses. On timeout the
/// child is killed (best effort) before the error is returned.
pub(crate) async fn start_with(options: &LaunchOptions) -> Result<DynamoDb, InstanceError> {
    let home = resolve_home()?;
    let allocator = options.allocator.as_deref().unwrap_or_else(|| port::shared());
    let port = allocator.next();
    let addr = format!("{DYNAMODB_HOSTNAME}:{port}");

    info!("Starting DynamoDB Local on {addr}");

    let mut child = spawn_emulator(&home, port, options.log_output)?;

    if options.log_output {
        forward_stderr(&mut child, port);
    }

    if let Err(e) = wait_for_connect(&addr, options.connect_timeout).await {
        warn!(
            "Port {port} never became connectable, killing emulator (PID: {:?})",
            child.id()
        );
        let _ = child.kill().await;
        return Err(e);
    }

    info!("DynamoDB Local ready at {addr} (PID: {:?})", child.id());

    Ok(DynamoDb::new(addr, port, child))
}

fn spawn_emulator(
    home: &Path,
    port: u16,
    pipe_stderr: bool,
) -> Result<TokioChild, InstanceError> {
    debug!(
        "Launching {JAVA_BINARY} with {} on port {port}",
        home.join(DYNAMODB_JAR).display()
    );

    build_launch_command(home, port, pipe_stderr)
        .spawn()
        .map_err(|e| InstanceError::Spawn {
            message: format!("Failed to launch {JAVA_BINARY}: {e}"),
            location: ErrorLocation::caller(),
            source: Box::new(e),
        })
}

/// Forward the child's stderr through `log`, one line at a time, tagged
/// with the allocated port. The task runs until the child closes its
/// stderr and is intentionally not joined.
fn forward_stderr(child: &mut TokioChild, port: u16) {
    let Some(stderr) = child.stderr.take() else {
        warn!("Emulator child has no stderr pipe, skipping log forwarding");
        return;
    };

    TokioSpawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            info!("[{LOG_TAG}:{port}] {line}");
        }
    });
}

async fn wait_for_connect(addr: &str, deadline: Duration) -> Result<(), InstanceError> {
    debug!("Waiting for {addr} to accept connections");

    let poll = async {
        let mut tick = interval(CONNECT_POLL_INTERVAL);
        loop {
            tick.tick().await;
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    drop(stream);
                    return;
                }
                Err(e) => trace!("{addr} not connectable yet: {e}"),
            }
        }
    };

    // The poll future is dropped either way, so nothing outlives this
    // call.
    match timeout(deadline, poll).await {
        Ok(()) => {
            debug!("{addr} is accepting connections");
            Ok(())
        }
        Err(_) => Err(InstanceError::ConnectTimeout {
            message: format!("{addr} did not accept a connection within {deadline:?}"),
            location: ErrorLocation::caller(),
        }),
    }
}
