// Unit tests for launch module private functions
// Integration tests for the public API are in integration_tests/instance.rs

use crate::instance::launch::build_launch_command;
use crate::{DYNAMODB_JAR, DYNAMODB_LIB_DIR};

use std::ffi::OsStr;
use std::path::Path;

/// **VALUE**: Verifies that `build_launch_command()` targets the java
/// binary with the jar, port, and in-memory flags in the documented
/// order.
///
/// **WHY THIS MATTERS**: The command line is the whole contract with
/// DynamoDB Local. A reordered or dropped flag does not fail loudly - the
/// emulator either binds the wrong port or silently persists to disk
/// between tests.
///
/// **BUG THIS CATCHES**: Would catch dropping `-inMemory`, mangling the
/// `-Djava.library.path=` prefix, or passing the port as a number the
/// emulator cannot parse.
#[test]
fn given_home_and_port_when_build_launch_command_called_then_arguments_are_complete() {
    // GIVEN: A home directory and an allocated port
    let home = Path::new("/opt/dynamodb-local");

    // WHEN: Building the launch command
    let cmd = build_launch_command(home, 8042, false);
    let std_cmd = cmd.as_std();

    // THEN: Program and argument list match the emulator contract
    assert_eq!(std_cmd.get_program(), "java");

    let args: Vec<&OsStr> = std_cmd.get_args().collect();
    assert_eq!(
        args,
        vec![
            OsStr::new("-Djava.library.path=/opt/dynamodb-local/DynamoDbLocal_lib"),
            OsStr::new("-jar"),
            OsStr::new("/opt/dynamodb-local/DynamoDBLocal.jar"),
            OsStr::new("-port"),
            OsStr::new("8042"),
            OsStr::new("-inMemory"),
        ]
    );
}

#[test]
fn given_any_home_when_build_launch_command_called_then_artifacts_live_under_home() {
    let home = Path::new("/srv/ddb");
    let cmd = build_launch_command(home, 8000, true);

    let args: Vec<String> = cmd
        .as_std()
        .get_args()
        .map(|a| a.to_string_lossy().to_string())
        .collect();

    assert!(args.iter().any(|a| a.ends_with(DYNAMODB_JAR)));
    assert!(args.iter().any(|a| a.contains(DYNAMODB_LIB_DIR)));
}
