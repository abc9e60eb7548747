use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;

/// Overrides the level picked from the command line flags
pub const LEVEL_ENV: &str = "HEARTH_LOG_LEVEL";

/// Parts of the app that log under their own target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Composer,
    KeyEvents,
    Rendering,
    Collaborators,
    Attachments,
}

impl LogCategory {
    pub const ALL: [LogCategory; 5] = [
        LogCategory::Composer,
        LogCategory::KeyEvents,
        LogCategory::Rendering,
        LogCategory::Collaborators,
        LogCategory::Attachments,
    ];

    pub fn target(self) -> &'static str {
        match self {
            LogCategory::Composer => "composer",
            LogCategory::KeyEvents => "key_events",
            LogCategory::Rendering => "rendering",
            LogCategory::Collaborators => "collaborator",
            LogCategory::Attachments => "attachments",
        }
    }

    /// Key events and per-frame rendering only show up with `--verbose`
    fn is_noisy(self) -> bool {
        matches!(self, LogCategory::KeyEvents | LogCategory::Rendering)
    }
}

/// Where the log goes and which categories reach it.
///
/// The UI owns the terminal in raw mode, so the log is always a file.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub enabled: bool,
    pub log_file: PathBuf,
    pub level: LevelFilter,
    categories: Vec<LogCategory>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_flags(false, false)
    }
}

impl LogConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::from_flags(false, false)
        }
    }

    /// Config for the `--verbose` / `--no-log` command line flags
    pub fn from_flags(verbose: bool, no_log: bool) -> Self {
        let categories = LogCategory::ALL
            .into_iter()
            .filter(|c| verbose || !c.is_noisy())
            .collect();
        Self {
            enabled: !no_log,
            log_file: PathBuf::from("hearth.log"),
            level: if verbose { LevelFilter::Trace } else { LevelFilter::Info },
            categories,
        }
    }

    /// Apply `HEARTH_LOG_LEVEL` when it names a valid level
    pub fn with_env_level(mut self, value: Option<&str>) -> Self {
        if let Some(level) = value.and_then(|v| LevelFilter::from_str(v.trim()).ok()) {
            self.level = level;
        }
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn allows(&self, category: LogCategory) -> bool {
        self.enabled && self.categories.contains(&category)
    }
}

/// Truncate the log file and install the global logger
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)?;

    let format = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();
    WriteLogger::init(config.level, format, file)?;

    let targets: Vec<&str> = config.categories.iter().map(|c| c.target()).collect();
    log::info!(
        "Logging to {} at {:?}, categories: {}",
        config.log_file.display(),
        config.level,
        targets.join(", ")
    );
    Ok(())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_category {
    ($config:expr, $category:ident, $level:ident, $($arg:tt)*) => {{
        let category = $crate::logging::LogCategory::$category;
        if $config.allows(category) {
            ::log::$level!(target: category.target(), $($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! log_composer {
    ($config:expr, $($arg:tt)*) => { $crate::__log_category!($config, Composer, debug, $($arg)*) };
}

#[macro_export]
macro_rules! log_key_event {
    ($config:expr, $($arg:tt)*) => { $crate::__log_category!($config, KeyEvents, debug, $($arg)*) };
}

#[macro_export]
macro_rules! log_rendering {
    ($config:expr, $($arg:tt)*) => { $crate::__log_category!($config, Rendering, trace, $($arg)*) };
}

#[macro_export]
macro_rules! log_collaborator {
    ($config:expr, $($arg:tt)*) => { $crate::__log_category!($config, Collaborators, info, $($arg)*) };
}

#[macro_export]
macro_rules! log_attachment {
    ($config:expr, $($arg:tt)*) => { $crate::__log_category!($config, Attachments, debug, $($arg)*) };
}
