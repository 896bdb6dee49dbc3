use crate::error::{CovenantError, Result};
use crate::model::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for covenant, stored in .covenant/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct CovenantConfig {
    /// Template directory, relative to the project directory unless absolute
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Where generated files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Formats exported when none are requested explicitly
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,

    /// Number of entries `history` shows
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Docx, ExportFormat::Pdf]
}

fn default_history_limit() -> usize {
    8
}

impl Default for CovenantConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            formats: default_formats(),
            history_limit: default_history_limit(),
        }
    }
}

pub const CONFIG_KEYS: [&str; 4] = ["templates-dir", "output-dir", "formats", "history-limit"];

impl CovenantConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CovenantError::Io)?;
        let config: CovenantConfig =
            serde_json::from_str(&content).map_err(CovenantError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CovenantError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CovenantError::Serialization)?;
        fs::write(config_path, content).map_err(CovenantError::Io)?;
        Ok(())
    }

    pub fn exists<P: AsRef<Path>>(config_dir: P) -> bool {
        config_dir.as_ref().join(CONFIG_FILENAME).exists()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "templates-dir" => Some(self.templates_dir.display().to_string()),
            "output-dir" => Some(self.output_dir.display().to_string()),
            "formats" => Some(
                self.formats
                    .iter()
                    .map(|f| f.extension())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "history-limit" => Some(self.history_limit.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "templates-dir" | "output-dir" => {
                if value.is_empty() {
                    return Err(CovenantError::Config(format!("{} cannot be empty", key)));
                }
                if key == "templates-dir" {
                    self.templates_dir = PathBuf::from(value);
                } else {
                    self.output_dir = PathBuf::from(value);
                }
            }
            "formats" => {
                let parsed = value
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| s.parse::<ExportFormat>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(CovenantError::Config)?;
                if parsed.is_empty() {
                    return Err(CovenantError::Config(
                        "formats needs at least one of txt, docx, pdf".to_string(),
                    ));
                }
                self.formats = ExportFormat::ordered(&parsed);
            }
            "history-limit" => {
                self.history_limit = value.parse().map_err(|_| {
                    CovenantError::Config(format!("history-limit must be a number, got {}", value))
                })?;
            }
            _ => return Err(CovenantError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }

    /// `path` resolved against `base` unless it is already absolute.
    pub fn resolve(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }
}
