#![cfg(unix)]

use std::os::unix::process::ExitStatusExt;
use std::process::Command;

use fanlog::{MessageFormat, logger_config};
use regex::Regex;

// Set in the re-run child; holds the log file path.
const CHILD_LOG: &str = "FATAL_ASSERT_CHILD_LOG";
const SIGABRT: i32 = 6;

fn fail_in_child(path: &str) -> ! {
    let _guard = logger_config()
        .with_log_file(path)
        .unwrap()
        .no_stdout()
        .with_format(MessageFormat::DEBUG_INFO)
        .init_global();
    let workers = 0;
    fanlog::fatal_assert!(workers > 0, "pool started with {} workers", workers);
    unreachable!("fatal_assert returned");
}

#[test]
fn fatal_assert_logs_flushes_and_aborts() {
    if let Ok(path) = std::env::var(CHILD_LOG) {
        fail_in_child(&path);
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fatal.log");
    let status = Command::new(std::env::current_exe().unwrap())
        .args([
            "fatal_assert_logs_flushes_and_aborts",
            "--exact",
            "--test-threads=1",
        ])
        .env(CHILD_LOG, &path)
        .status()
        .unwrap();
    assert!(!status.success());
    assert_eq!(status.code(), None);
    assert_eq!(status.signal(), Some(SIGABRT));

    let log = std::fs::read_to_string(&path).unwrap();
    let lines = log.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2, "{log}");
    let assertion = Regex::new(
        r"^INTERNAL ERROR at (fanlog/)?tests/fatal_assert\.rs:\d+ in fatal_assert::fail_in_child: Assertion failed: workers > 0\. Detailed info follows\.$",
    )
    .unwrap();
    assert!(assertion.is_match(lines[0]), "{}", lines[0]);
    assert!(
        lines[1].ends_with(" in fatal_assert::fail_in_child: pool started with 0 workers"),
        "{}",
        lines[1]
    );
}
