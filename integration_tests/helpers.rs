//! Shared setup for the integration suite: a fern logger and fake
//! DynamoDB Local home directories.

use dynamodb_test::{DYNAMODB_HOME_ENV, DYNAMODB_JAR, DYNAMODB_LIB_DIR};

use std::env;
use std::fs::{File, create_dir};
use std::sync::Once;
use std::time::SystemTime;

use fern::Dispatch;
use humantime::format_rfc3339;
use log::LevelFilter;
use tempfile::TempDir;

static INIT_LOGGER_ONCE: Once = Once::new();

/// Route `log` output to stdout so `--nocapture` runs show the fixture's
/// lifecycle lines. Safe to call from every test.
pub fn init_logger() {
    INIT_LOGGER_ONCE.call_once(|| {
        let _ = Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}][{}][{}] {}",
                    format_rfc3339(SystemTime::now()),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(LevelFilter::Debug)
            .chain(std::io::stdout())
            .apply();
    });
}

/// A home directory with the expected artifact names but a jar no JVM
/// can run. Spawning against it either fails outright (no java on the
/// machine) or produces a child that exits without ever opening its
/// port.
pub fn fake_home() -> TempDir {
    let home = TempDir::new().expect("temp home dir");
    create_dir(home.path().join(DYNAMODB_LIB_DIR)).expect("lib dir");
    File::create(home.path().join(DYNAMODB_JAR)).expect("empty jar");
    home
}

pub fn set_home(value: &str) {
    // SAFETY: tests touching the environment are #[serial].
    unsafe { env::set_var(DYNAMODB_HOME_ENV, value) };
}

pub fn clear_home() {
    // SAFETY: tests touching the environment are #[serial].
    unsafe { env::remove_var(DYNAMODB_HOME_ENV) };
}
