//! Configuration loading.
//!
//! Precedence, highest first: environment variables, then the config
//! file at ~/.config/freshbi/config.toml, then built-in defaults.

use serde::Deserialize;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Effective runtime configuration after all layers are merged
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key. Absence is not fatal: the dashboard runs without
    /// it and the chat view reports the missing credential instead.
    pub api_key: Option<String>,

    /// Base URL of the generative-language API
    pub api_base: String,

    /// Model served behind the chat assistant
    pub model: String,

    /// Theme name: "dark", "light", "nord"
    pub theme: String,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            theme: "dark".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Log file rotation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    /// Lenient parse; unknown values mean daily rotation
    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter level for the freshbi target: trace .. error
    pub level: String,
    /// Write rotating log files in addition to the TUI log buffer
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name prefix, e.g. "freshbi" -> "freshbi.2024-01-15.log"
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "freshbi".to_string(),
        }
    }
}

impl LoggingConfig {
    fn merge(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let base = Self::default();
        Self {
            level: file.level.unwrap_or(base.level),
            file_enabled: file.file_enabled.unwrap_or(base.file_enabled),
            file_dir: file.file_dir.map(PathBuf::from).unwrap_or(base.file_dir),
            file_rotation: file
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(base.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(base.file_prefix),
        }
    }
}

/// Shape of config.toml. Every key is optional so a partial file works.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_key: Option<String>,
    api_base: Option<String>,
    model: Option<String>,
    theme: Option<String>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_rotation: Option<String>,
    file_prefix: Option<String>,
}

/// Environment variable if set, else the file value, else the default
fn pick(env_var: &str, file_value: Option<String>, default: String) -> String {
    std::env::var(env_var).ok().or(file_value).unwrap_or(default)
}

impl Config {
    /// ~/.config/freshbi/config.toml on every platform
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("freshbi").join("config.toml"))
    }

    /// Write the commented template on first run so users can discover
    /// the options. Never touches an existing file, and failure here is
    /// not fatal since every option has a default.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// A file that exists but does not parse is fatal: failing fast with
    /// the toml error beats silently running on defaults while the user
    /// debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run: freshbi config --reset\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Merge all three layers into the effective configuration
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let base = Self::default();

        // The key has no default; an empty string counts as unset so the
        // template placeholder does not look like a credential
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty());

        Self {
            api_key,
            api_base: pick("FRESHBI_API_BASE", file.api_base, base.api_base),
            model: pick("FRESHBI_MODEL", file.model, base.model),
            theme: pick("FRESHBI_THEME", file.theme, base.theme),
            logging: LoggingConfig::merge(file.logging),
        }
    }

    /// The template written on first run and by `config --reset`
    pub fn to_toml(&self) -> String {
        format!(
            r#"# freshbi configuration

# Gemini API key (GEMINI_API_KEY env var overrides)
# Leave empty to run the dashboard without the chat assistant
api_key = "{api_key}"

# Base URL of the generative-language API
api_base = "{api_base}"

# Model behind the chat assistant
model = "{model}"

# Theme: dark, light, nord
theme = "{theme}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the in-TUI log buffer)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_key = self.api_key.as_deref().unwrap_or(""),
            api_base = self.api_base,
            model = self.model,
            theme = self.theme,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_google() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_base, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn template_round_trips_through_toml() {
        let template = Config::default().to_toml();
        let parsed: FileConfig = toml::from_str(&template).expect("template must parse");
        assert_eq!(parsed.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(parsed.theme.as_deref(), Some("dark"));
        // Empty string in the template means "no key configured"
        assert_eq!(parsed.api_key.as_deref(), Some(""));
        let logging = LoggingConfig::merge(parsed.logging);
        assert_eq!(logging.level, "info");
        assert!(!logging.file_enabled);
    }

    #[test]
    fn rotation_parses_leniently() {
        assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("never"), LogRotation::Never);
        assert_eq!(LogRotation::parse("bogus"), LogRotation::Daily);
    }

    #[test]
    fn file_logging_overrides_defaults() {
        let file = FileLogging {
            level: Some("debug".to_string()),
            file_enabled: Some(true),
            file_dir: Some("/tmp/freshbi-logs".to_string()),
            file_rotation: Some("hourly".to_string()),
            file_prefix: None,
        };
        let logging = LoggingConfig::merge(Some(file));
        assert_eq!(logging.level, "debug");
        assert!(logging.file_enabled);
        assert_eq!(logging.file_dir, PathBuf::from("/tmp/freshbi-logs"));
        assert_eq!(logging.file_rotation, LogRotation::Hourly);
        assert_eq!(logging.file_prefix, "freshbi");
    }
}
