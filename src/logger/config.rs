//! Runtime logger settings, built from the `[logger]` section by
//! `LoggerSettings::into_logger_config`.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::Level;

const LEVELS: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// Initial filter; must name one of the tracing levels.
    pub level: String,
}

impl LoggerConfig {
    /// Checks the level, the file sink, and that something will be written.
    pub fn validate(&self) -> Result<()> {
        self.parse_level()?;
        self.file.validate().context("Invalid file configuration")?;

        if !(self.console.enabled || self.file.enabled) {
            bail!("Console and file output are both disabled, nothing would be logged");
        }
        Ok(())
    }

    pub fn parse_level(&self) -> Result<Level> {
        let wanted = self.level.to_ascii_lowercase();
        LEVELS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, level)| *level)
            .with_context(|| {
                format!(
                    "Unknown log level '{}', expected one of trace, debug, info, warn, error",
                    self.level
                )
            })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors, applied only when stdout is a terminal
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// Size-rotated log file.
///
/// When the active file reaches `max_size` bytes it is renamed to `<path>.1`,
/// older files shift up by one, and anything past `max_files` is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
    pub max_size: u64,
    pub max_files: usize,
}

impl FileConfig {
    /// Limits are only enforced for an enabled sink; the writer creates
    /// missing directories itself.
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.path.as_os_str().is_empty() {
            bail!("An enabled log file needs a path");
        }
        if self.max_size < 1024 {
            bail!("max_size is {} bytes, the minimum is 1024", self.max_size);
        }
        if self.max_files == 0 {
            bail!("max_files must keep at least one file");
        }
        Ok(())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/gathering.log"),
            append: true,
            format: LogFormat::default(),
            max_size: 10 * 1024 * 1024,
            max_files: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => bail!("Unknown log format '{}', expected full, compact or json", s),
        }
    }
}
