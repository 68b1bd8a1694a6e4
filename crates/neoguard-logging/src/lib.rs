//! Console logger for NewEngine tools, configured from `NEOGUARD_LOG*` environment variables.

use env_logger::fmt::style::{AnsiColor, Style};
use env_logger::Builder;
use log::{Level, LevelFilter};
use thiserror::Error;

use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logger already initialised: {0}")]
    AlreadyInitialised(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLoggerConfig {
    pub level: LevelFilter,
    pub colors: bool,
    pub include_module: bool,
}

impl ConsoleLoggerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let level = lookup("NEOGUARD_LOG")
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        let colors = lookup("NEOGUARD_LOG_COLORS")
            .map(|v| v != "0")
            .unwrap_or(true);
        let include_module = lookup("NEOGUARD_LOG_MODULE")
            .map(|v| v != "0")
            .unwrap_or(true);

        Self {
            level,
            colors,
            include_module,
        }
    }
}

impl Default for ConsoleLoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn level_style(level: Level) -> Style {
    let color = match level {
        Level::Error => AnsiColor::Red,
        Level::Warn => AnsiColor::Yellow,
        Level::Info => AnsiColor::Green,
        Level::Debug => AnsiColor::Blue,
        Level::Trace => AnsiColor::Magenta,
    };
    let style = Style::new().fg_color(Some(color.into()));
    match level {
        Level::Error | Level::Warn => style.bold(),
        _ => style,
    }
}

/// Write one log line in the console layout.
pub fn write_record<W: Write + ?Sized>(
    out: &mut W,
    config: &ConsoleLoggerConfig,
    level: Level,
    target: &str,
    args: fmt::Arguments<'_>,
) -> io::Result<()> {
    let style = if config.colors {
        level_style(level)
    } else {
        Style::new()
    };

    if config.include_module {
        writeln!(out, "[{style}{level:<5}{style:#}] {target:<25} {args}")
    } else {
        writeln!(out, "[{style}{level:<5}{style:#}] {args}")
    }
}

pub fn builder(config: &ConsoleLoggerConfig) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(config.level);

    let config = config.clone();
    builder.format(move |buf, record| {
        write_record(buf, &config, record.level(), record.target(), *record.args())
    });

    builder
}

/// Install the console logger as the global `log` backend.
pub fn init(config: &ConsoleLoggerConfig) -> Result<(), LoggingError> {
    builder(config).try_init()?;
    log::debug!(target: "neoguard", "console logger ready at level {}", config.level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ConsoleLoggerConfig::from_lookup(lookup(&[]));

        assert_eq!(
            config,
            ConsoleLoggerConfig {
                level: LevelFilter::Info,
                colors: true,
                include_module: true,
            }
        );
    }

    #[rstest]
    #[case("debug", LevelFilter::Debug)]
    #[case("OFF", LevelFilter::Off)]
    #[case("trace", LevelFilter::Trace)]
    #[case("loud", LevelFilter::Info)]
    fn level_from_env(#[case] raw: &str, #[case] expected: LevelFilter) {
        let config = ConsoleLoggerConfig::from_lookup(lookup(&[("NEOGUARD_LOG", raw)]));
        assert_eq!(config.level, expected);
    }

    #[test]
    fn switches_only_turn_off_on_zero() {
        let config = ConsoleLoggerConfig::from_lookup(lookup(&[
            ("NEOGUARD_LOG_COLORS", "0"),
            ("NEOGUARD_LOG_MODULE", "no"),
        ]));

        assert!(!config.colors);
        assert!(config.include_module);
    }

    #[test]
    fn plain_record_with_module() {
        let config = ConsoleLoggerConfig {
            level: LevelFilter::Info,
            colors: false,
            include_module: true,
        };
        let mut out = Vec::new();
        write_record(&mut out, &config, Level::Warn, "neoguard", format_args!("low on {}", "memory"))
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("[WARN ] {:<25} low on memory\n", "neoguard")
        );
    }

    #[test]
    fn plain_record_without_module() {
        let config = ConsoleLoggerConfig {
            level: LevelFilter::Info,
            colors: false,
            include_module: false,
        };
        let mut out = Vec::new();
        write_record(&mut out, &config, Level::Error, "neoguard", format_args!("boom")).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[ERROR] boom\n");
    }

    #[test]
    fn colored_record_wraps_level() {
        let config = ConsoleLoggerConfig {
            level: LevelFilter::Info,
            colors: true,
            include_module: false,
        };
        let mut out = Vec::new();
        write_record(&mut out, &config, Level::Info, "neoguard", format_args!("ready")).unwrap();

        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("\u{1b}["));
        assert!(line.ends_with("] ready\n"));
    }

    #[test]
    fn second_init_is_rejected() {
        let config = ConsoleLoggerConfig::from_lookup(lookup(&[("NEOGUARD_LOG", "off")]));

        let _ = init(&config);
        assert!(matches!(init(&config), Err(LoggingError::AlreadyInitialised(_))));
    }
}
