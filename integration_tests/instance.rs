use crate::helpers::{clear_home, fake_home, init_logger, set_home};

use dynamodb_test::{DynamoDb, InstanceError, LaunchOptions, PortAllocator};

use std::sync::Arc;
use std::time::{Duration, Instant};

use serial_test::serial;
use sysinfo::{Pid, ProcessesToUpdate, System};

// ============================================================================
// Public API tests for starting and stopping DynamoDB Local
// These test the PUBLIC interface from an external consumer's perspective
// ============================================================================

// Note: a real DynamoDB Local install (and a JVM) only exists on some
// machines. Tests that would need one follow the environment-tolerant
// pattern: every outcome the environment can produce is legal, panics
// are not.

fn process_is_running(pid: u32) -> bool {
    let mut sys = System::new_all();
    sys.refresh_processes(ProcessesToUpdate::All, true);
    sys.process(Pid::from_u32(pid)).is_some()
}

/// **VALUE**: Verifies that an unset home variable fails fast with a
/// Config error and never spawns anything.
///
/// **WHY THIS MATTERS**: Configuration problems should be diagnosed
/// before any side effect. A spawn attempt with an empty home would
/// surface as a misleading java error instead.
#[tokio::test]
#[serial]
async fn given_unset_home_when_start_called_then_config_error_and_no_spawn() {
    init_logger();

    // GIVEN: No home variable
    clear_home();

    // WHEN: Starting
    let result = DynamoDb::start().await;

    // THEN: A Config error, immediately
    assert!(matches!(result, Err(InstanceError::Config { .. })));
}

/// **VALUE**: Verifies the failure path when the emulator can never open
/// its port: start gives up after the configured timeout and no child is
/// left running.
///
/// **WHY THIS MATTERS**: This is the cleanup guarantee of the fixture. A
/// start that fails but leaks its child turns one broken test into a
/// port-exhausted test machine.
///
/// **ENVIRONMENT-DEPENDENT**: With no JVM installed the spawn itself
/// fails, which is an equally valid outcome; both paths must return
/// promptly instead of hanging for the default 10 s.
#[tokio::test]
#[serial]
async fn given_unrunnable_jar_when_start_called_then_fails_within_timeout() {
    init_logger();

    // GIVEN: A home whose jar no JVM can run, and a short deadline
    let home = fake_home();
    set_home(&home.path().to_string_lossy());

    let options = LaunchOptions {
        log_output: true,
        connect_timeout: Duration::from_millis(500),
        allocator: Some(Arc::new(PortAllocator::new(27000))),
    };

    // WHEN: Starting against it
    let started = Instant::now();
    let result = DynamoDb::start_with(&options).await;
    let elapsed = started.elapsed();

    // THEN: Spawn error (no java) or connect timeout (java rejected the
    // jar without ever listening), well before the default deadline
    match result {
        Err(InstanceError::Spawn { .. }) => {}
        Err(InstanceError::ConnectTimeout { .. }) => {
            assert!(
                elapsed >= Duration::from_millis(500),
                "Timeout should not fire early (elapsed: {elapsed:?})"
            );
        }
        other => panic!("Expected Spawn or ConnectTimeout, got {other:?}"),
    }

    assert!(
        elapsed < Duration::from_secs(5),
        "Failure should be prompt (elapsed: {elapsed:?})"
    );

    clear_home();
}

/// **VALUE**: Verifies that `start()` handles every environment
/// gracefully, and that on machines with a real DynamoDB Local install
/// the full lifecycle works: reachable URL, live process, clean close,
/// Process error on double close.
///
/// **WHY THIS MATTERS**: This is the public contract end to end. The
/// test proves start/close never panic regardless of what is installed,
/// and exercises the happy path wherever it can.
///
/// **ENVIRONMENT-DEPENDENT**: This test passes in all environments:
/// - No DYNAMODB_TEST_PATH → Config error (expected)
/// - Path set, no JVM → Spawn error (expected)
/// - JVM but broken install → ConnectTimeout (expected)
/// - Real install → full lifecycle assertions run
#[tokio::test]
#[serial]
async fn given_any_environment_when_start_called_then_handles_gracefully() {
    init_logger();

    // GIVEN: Whatever this machine provides

    // WHEN: Starting with defaults
    let result = DynamoDb::start().await;

    // THEN: Every outcome is handled without panicking
    match result {
        Ok(mut db) => {
            // Real install: verify the whole lifecycle
            assert_eq!(db.url(), format!("http://localhost:{}", db.port()));
            assert_eq!(db.addr(), format!("localhost:{}", db.port()));

            let pid = db.id().expect("running instance should have a pid");
            assert!(process_is_running(pid), "Child should be running");

            db.close().await.expect("close on a live instance");
            assert!(
                !process_is_running(pid),
                "Child should be gone after close"
            );

            // Documented non-idempotence
            assert!(matches!(
                db.close().await,
                Err(InstanceError::Process { .. })
            ));
        }
        Err(InstanceError::Config { .. }) => {
            // Expected: DYNAMODB_TEST_PATH not set on this machine
        }
        Err(InstanceError::Spawn { .. }) => {
            // Expected: no JVM available
        }
        Err(InstanceError::ConnectTimeout { .. }) => {
            // Expected: install present but not runnable
        }
        Err(InstanceError::Process { .. }) => {
            panic!("Process error from start() indicates a lifecycle bug");
        }
    }
}
