use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Unknown level names fall back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the global logger. `RUST_LOG` overrides the configured level.
pub fn init(level: &str) {
    if let Err(e) = SimpleLogger::new().with_level(parse_level(level)).env().init() {
        eprintln!("Logger already initialized: {}", e);
    }
}
