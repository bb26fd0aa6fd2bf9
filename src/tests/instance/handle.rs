// Unit tests for the DynamoDb handle using a stand-in child process.
// `sleep` is a fine substitute for the emulator here: the handle only
// signals and reaps, it never speaks the wire protocol.

use crate::error::instance::InstanceError;
use crate::instance::handle::DynamoDb;

use tokio::process::Command as TokioCommand;

fn sleeper(port: u16) -> DynamoDb {
    let child = TokioCommand::new("sleep")
        .arg("30")
        .spawn()
        .expect("sleep should spawn");
    DynamoDb::new(format!("localhost:{port}"), port, child)
}

#[tokio::test]
async fn given_handle_when_url_called_then_formats_http_localhost_port() {
    let mut db = sleeper(8123);

    assert_eq!(db.url(), "http://localhost:8123");
    assert_eq!(db.addr(), "localhost:8123");
    assert_eq!(db.port(), 8123);

    db.close().await.expect("close should succeed");
}

/// **VALUE**: Verifies that `close()` terminates a live child and reaps
/// it.
///
/// **WHY THIS MATTERS**: The whole point of the fixture is that no
/// emulator process outlives the test that started it. A close that
/// signals without reaping leaves zombies that accumulate across a
/// test run.
///
/// **BUG THIS CATCHES**: Would catch dropping the `wait()` after the
/// kill, or swallowing the kill result entirely.
#[tokio::test]
async fn given_live_handle_when_close_called_then_child_is_reaped() {
    // GIVEN: A handle over a live child
    let mut db = sleeper(8200);
    assert!(db.id().is_some(), "Live child should have a pid");

    // WHEN: Closing
    let result = db.close().await;

    // THEN: Close succeeds and the child has been reaped
    assert!(result.is_ok(), "Close on a live child should succeed");
    assert_eq!(db.id(), None, "Reaped child should no longer have a pid");
}

/// **VALUE**: Verifies the documented non-idempotence of `close()`.
///
/// **WHY THIS MATTERS**: Double-close is a caller bug and must surface
/// as a Process error rather than hanging on a wait for a process that
/// no longer exists.
#[tokio::test]
async fn given_closed_handle_when_close_called_again_then_returns_process_error() {
    // GIVEN: A handle that was already closed
    let mut db = sleeper(8201);
    db.close().await.expect("first close should succeed");

    // WHEN: Closing a second time
    let result = db.close().await;

    // THEN: A Process error, not a hang or panic
    assert!(matches!(result, Err(InstanceError::Process { .. })));
}
