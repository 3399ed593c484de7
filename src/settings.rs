use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CaixaError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// Active company (tenant) code; every command is scoped to it.
    #[serde(default)]
    pub company_code: String,
    #[serde(default)]
    pub user_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            company_code: String::new(),
            user_name: String::new(),
        }
    }
}

fn config_dir() -> PathBuf {
    // Env override so tests and scripts can sandbox the config.
    if let Ok(dir) = std::env::var("CAIXA_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("caixa")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("caixa")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| CaixaError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn db_path() -> PathBuf {
    get_data_dir().join("caixa.db")
}

/// The company code commands operate on: the settings' active company.
pub fn active_company() -> Result<String> {
    let code = load_settings().company_code;
    if code.is_empty() {
        return Err(CaixaError::Settings(
            "no active company; run 'caixa companies add' or 'caixa use CODE'".to_string(),
        ));
    }
    Ok(code)
}
