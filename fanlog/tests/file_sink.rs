use fanlog::{Level, Location, Logger, MessageFormat, ProcessIdentity, Settings, Sink, logger_config};
use regex::Regex;

fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn default_format_decorates_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default.log");
    let logger = Logger::with_process(ProcessIdentity::new("svc", 4242));
    logger.add_sink(Sink::file(&path));
    logger.emit(Level::Info, None, format_args!("value={}", 5));
    logger.emit_empty(Level::Warning, None);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    let info = Regex::new(r"^\[.*\] \[svc\(4242\)\] INFO: value=5$").unwrap();
    assert!(info.is_match(&lines[0]), "{}", lines[0]);
    // timer seconds, zone abbreviation, date and time, zone link
    let date_time = Regex::new(r"^\[\d+ \(.+\) \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} '.*'\]").unwrap();
    assert!(date_time.is_match(&lines[0]), "{}", lines[0]);
    assert!(lines[1].ends_with("] WARNING."), "{}", lines[1]);
}

#[test]
fn full_debug_records_wrap_onto_two_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("debug.log");
    let logger = Logger::with_process(ProcessIdentity::new("svc", 1));
    let settings = Settings::default().with_format(
        MessageFormat::DATE | MessageFormat::NAME | MessageFormat::DEBUG_INFO | MessageFormat::WORD_WRAP,
    );
    logger.add_sink(Sink::file(&path).with_settings(settings));
    let here = Location::new(40, "src/worker.rs", "worker::poll");
    logger.emit(Level::Debug, Some(&here), format_args!("queue empty"));

    let lines = read_lines(&path);
    let first = Regex::new(r"^\[\d{4}-\d{2}-\d{2}\] \[svc\] DEBUG at src/worker.rs:40 in worker::poll:$").unwrap();
    let second = Regex::new(r"^\[\d{4}-\d{2}-\d{2}\] \[svc\] -> queue empty$").unwrap();
    assert_eq!(lines.len(), 2);
    assert!(first.is_match(&lines[0]), "{}", lines[0]);
    assert!(second.is_match(&lines[1]), "{}", lines[1]);
}

#[test]
fn unopenable_file_sink_drops_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("app.log");
    let logger = Logger::with_process(ProcessIdentity::new("svc", 1));
    logger.add_sink(Sink::file(&path));
    logger.emit(Level::Critical, None, format_args!("nowhere to go"));
    logger.flush();
    assert!(!path.exists());
}

// The only test in this binary touching the process-wide logger.
#[test]
fn log_facade_and_macros_reach_the_global_scope() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("global.log");
    let guard = logger_config()
        .with_log_file(&path)
        .unwrap()
        .no_stdout()
        .with_name("bridge")
        .with_level(Level::Debug)
        .with_format(MessageFormat::NAME | MessageFormat::DEBUG_INFO)
        .init_global();
    log::error!("from log {}", 1);
    fanlog::warning!("from macro {}", 2);
    fanlog::debug!("located");
    fanlog::critical!();
    drop(guard);
    log::error!("after the scope");

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 4, "{lines:?}");
    assert_eq!(lines[0], "bridge: ERROR: from log 1");
    assert_eq!(lines[1], "bridge: WARNING: from macro 2");
    let located = Regex::new(
        r"^bridge: DEBUG at (fanlog/)?tests/file_sink\.rs:\d+ in file_sink::log_facade_and_macros_reach_the_global_scope: located$",
    )
    .unwrap();
    assert!(located.is_match(&lines[2]), "{}", lines[2]);
    assert_eq!(lines[3], "bridge: CRITICAL ERROR.");
}
