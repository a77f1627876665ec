use fanlog::{Level, Logger, MessageFormat, Settings, Sink};

fn main() {
    let logger = Logger::new();
    let settings = Settings::default()
        .with_verbosity(Level::Info)
        .with_format(MessageFormat::TIME_MILLIS | MessageFormat::NAME | MessageFormat::MESSAGE);
    logger.add_sink(Sink::stdout().with_settings(settings));
    let (channel, lines) = Sink::channel();
    logger.add_sink(channel.with_settings(settings.with_format(MessageFormat::MESSAGE)));

    std::thread::scope(|s| {
        for i in 0..4 {
            let logger = &logger;
            s.spawn(move || {
                logger.emit(Level::Info, None, format_args!("worker {i} finished"));
            });
        }
    });

    println!("\n{} lines went through the channel", lines.try_iter().count());
}
