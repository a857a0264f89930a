//! Application configuration stored under the user config directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "studytui";
const CONFIG_FILE: &str = "config.toml";

/// Template written on first run so the file is easy to hand-edit.
const DEFAULT_CONFIG: &str = r#"# StudyTUI configuration.
#
# Subjects are listed in the order they appear on the home screen.
subjects = ["Korean", "Math", "English", "Social Studies"]

# Pages to finish per subject before it counts as done for the day.
pages_per_subject = 6

[rewards]
# Game minutes earned per minute studied, as a percentage.
earn_percent = 30
# Fixed weekend game-time ceiling in minutes.
weekend_game_minutes = 120
# Fixed daily video-time ceiling in minutes.
daily_video_minutes = 120
"#;

/// Errors raised while locating, writing, or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory could be resolved.
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    /// The default configuration file could not be written.
    #[error("failed to write default configuration to {path}")]
    WriteDefault {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration sources could not be read or deserialized.
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    /// The configuration deserialized but holds unusable values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Reward tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSettings {
    /// Percentage of studied minutes converted to game minutes.
    pub earn_percent: u8,
    /// Weekend game-time ceiling in minutes.
    pub weekend_game_minutes: u32,
    /// Daily video-time ceiling in minutes.
    pub daily_video_minutes: u32,
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            earn_percent: 30,
            weekend_game_minutes: 120,
            daily_video_minutes: 120,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ordered study subjects shown on the home screen.
    pub subjects: Vec<String>,
    /// Pages to finish per subject per day.
    pub pages_per_subject: u8,
    /// Reward tuning knobs.
    pub rewards: RewardSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subjects: vec![
                "Korean".to_string(),
                "Math".to_string(),
                "English".to_string(),
                "Social Studies".to_string(),
            ],
            pages_per_subject: 6,
            rewards: RewardSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location, layered with
    /// `STUDYTUI_*` environment overrides on top of built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path()?)
    }

    /// Load configuration from an explicit path. The file is optional;
    /// missing files yield the built-in defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let settings = Config::builder()
            .set_default("subjects", defaults.subjects.clone())?
            .set_default("pages_per_subject", i64::from(defaults.pages_per_subject))?
            .set_default(
                "rewards.earn_percent",
                i64::from(defaults.rewards.earn_percent),
            )?
            .set_default(
                "rewards.weekend_game_minutes",
                i64::from(defaults.rewards.weekend_game_minutes),
            )?
            .set_default(
                "rewards.daily_video_minutes",
                i64::from(defaults.rewards.daily_video_minutes),
            )?
            .add_source(File::from(path.as_ref().to_path_buf()).required(false))
            .add_source(Environment::with_prefix("STUDYTUI").separator("__"))
            .build()?;

        let loaded: AppConfig = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.subjects.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one subject must be configured".to_string(),
            ));
        }
        for (idx, subject) in self.subjects.iter().enumerate() {
            if subject.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "subject at position {idx} is blank"
                )));
            }
            if self.subjects[..idx].contains(subject) {
                return Err(ConfigError::Invalid(format!(
                    "subject '{subject}' is listed more than once"
                )));
            }
        }
        if self.pages_per_subject == 0 {
            return Err(ConfigError::Invalid(
                "pages_per_subject must be at least 1".to_string(),
            ));
        }
        if self.rewards.earn_percent > 100 {
            return Err(ConfigError::Invalid(
                "rewards.earn_percent cannot exceed 100".to_string(),
            ));
        }
        Ok(())
    }
}

/// Directory holding StudyTUI configuration.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDir)
}

/// Full path of the configuration file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Write the commented default configuration if no file exists yet.
pub fn ensure_default_config() -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    if path.exists() {
        return Ok(path);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::WriteDefault {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, DEFAULT_CONFIG).map_err(|source| ConfigError::WriteDefault {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Default configuration written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<(), ConfigError> {
        let dir = tempdir().expect("tempdir");
        let loaded = AppConfig::load_from(dir.path().join("nope.toml"))?;
        let defaults = AppConfig::default();
        assert_eq!(loaded.subjects, defaults.subjects);
        assert_eq!(loaded.pages_per_subject, 6);
        assert_eq!(loaded.rewards.earn_percent, 30);
        assert_eq!(loaded.rewards.weekend_game_minutes, 120);
        assert_eq!(loaded.rewards.daily_video_minutes, 120);
        Ok(())
    }

    #[test]
    fn default_template_parses_to_defaults() -> Result<(), ConfigError> {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, DEFAULT_CONFIG).expect("write template");
        let loaded = AppConfig::load_from(&path)?;
        assert_eq!(loaded.subjects, AppConfig::default().subjects);
        assert_eq!(loaded.pages_per_subject, 6);
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<(), ConfigError> {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "subjects = [\"Reading\", \"Writing\"]\npages_per_subject = 4\n",
        )
        .expect("write config");
        let loaded = AppConfig::load_from(&path)?;
        assert_eq!(loaded.subjects, vec!["Reading", "Writing"]);
        assert_eq!(loaded.pages_per_subject, 4);
        // Untouched section keeps its defaults.
        assert_eq!(loaded.rewards.daily_video_minutes, 120);
        Ok(())
    }

    #[test]
    fn zero_page_quota_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "pages_per_subject = 0\n").expect("write config");
        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn duplicate_subjects_are_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "subjects = [\"Math\", \"Math\"]\n").expect("write config");
        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
