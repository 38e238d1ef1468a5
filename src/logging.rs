use colored::Colorize;
use log::{Level, LevelFilter};

const LOG_ENV: &str = "OPENPAAS_LOG";

/// Route `log` records to stderr, keeping stdout free for the child tools.
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    let level = level_from_env(std::env::var(LOG_ENV).ok().as_deref());

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", level_label(record.level()), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

fn level_label(level: Level) -> colored::ColoredString {
    let label = format!("[{}]", level);
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.dimmed(),
    }
}
