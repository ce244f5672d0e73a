use log::{LevelFilter, Record};

/// `[LEVEL][target] message`
pub fn format_line(record: &Record) -> String {
    format!("[{}][{}] {}", record.level(), record.target(), record.args())
}

/// Installs the global logger, writing to stderr. Fails if a logger is
/// already installed.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, _message, record| out.finish(format_args!("{}", format_line(record))))
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
