use std::path::PathBuf;

use fanlog::{Level, MessageFormat, logger_config};

fn main() {
    let path = PathBuf::from("/tmp/fanlog_example_scoped.log");
    let _ = std::fs::remove_file(&path);

    let _guard = logger_config()
        .with_name("scoped-demo")
        .init_global();
    fanlog::info!("starting");

    // while the job's scope is active it also writes a log file, and stdout
    // takes the scope's bare format
    logger_config()
        .with_log_file(&path)
        .unwrap()
        .with_format(MessageFormat::MESSAGE | MessageFormat::TIME_MILLIS)
        .with_level(Level::Debug)
        .scope_local(|| {
            for step in 0..3 {
                fanlog::debug!("step {step}");
            }
            log::warn!("job done");
        });

    fanlog::info!("back to stdout only");

    println!("\n--- {} ---", path.display());
    print!("{}", std::fs::read_to_string(&path).unwrap());
}
