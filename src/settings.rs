use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RemitError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_keyword_file")]
    pub keyword_file: String,
    #[serde(default = "default_template_file")]
    pub template_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_keyword_file() -> String {
    "data/Remittance Certificate Key Words.xlsx".to_string()
}

fn default_template_file() -> String {
    "template/Template.docx".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyword_file: default_keyword_file(),
            template_file: default_template_file(),
            output_dir: default_output_dir(),
        }
    }
}

impl Settings {
    /// Command-line overrides win over stored values for one run.
    pub fn with_overrides(
        mut self,
        keyword_file: Option<String>,
        template_file: Option<String>,
        output_dir: Option<String>,
    ) -> Self {
        if let Some(k) = keyword_file {
            self.keyword_file = k;
        }
        if let Some(t) = template_file {
            self.template_file = t;
        }
        if let Some(o) = output_dir {
            self.output_dir = o;
        }
        self
    }

    pub fn keyword_path(&self) -> PathBuf {
        PathBuf::from(shellexpand_path(&self.keyword_file))
    }

    pub fn template_path(&self) -> PathBuf {
        PathBuf::from(shellexpand_path(&self.template_file))
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(shellexpand_path(&self.output_dir))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("remitcert")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn parse_settings(content: &str) -> Settings {
    serde_json::from_str(content).unwrap_or_default()
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        parse_settings(&content)
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| RemitError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

/// Expand a leading `~`. Other paths are left relative so they resolve
/// against the working directory of the run.
pub fn shellexpand_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}
