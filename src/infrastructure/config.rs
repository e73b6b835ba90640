//! Configuration management

use crate::error::{JournoError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory holding the config file and the store
pub const JOURNO_DIR: &str = ".journo";

pub const DEFAULT_RENDERER: &str = "wkhtmltopdf";
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;

fn default_renderer() -> String {
    DEFAULT_RENDERER.to_string()
}

fn default_render_timeout() -> u64 {
    DEFAULT_RENDER_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Acting user id
    pub user: String,
    /// HTML-to-PDF converter binary
    #[serde(default = "default_renderer")]
    pub renderer: String,
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            user: Self::detect_default_user(),
            renderer: default_renderer(),
            render_timeout_secs: DEFAULT_RENDER_TIMEOUT_SECS,
            created: Utc::now(),
        }
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(JOURNO_DIR).join("config.toml")
    }

    /// Load config from .journo/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(Self::config_path(path)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                JournoError::NotJournoDirectory(path.to_path_buf())
            } else {
                JournoError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| JournoError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .journo/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let journo_dir = path.join(JOURNO_DIR);
        if !journo_dir.exists() {
            fs::create_dir(&journo_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(Self::config_path(path), contents)?;

        Ok(())
    }

    /// The acting user; JOURNO_USER wins over the stored value
    pub fn get_user(&self) -> String {
        std::env::var("JOURNO_USER")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.user.clone())
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Read a key by name for `journo config KEY`
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "user" => Ok(self.user.clone()),
            "renderer" => Ok(self.renderer.clone()),
            "render_timeout_secs" => Ok(self.render_timeout_secs.to_string()),
            "created" => Ok(self.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a key by name for `journo config KEY VALUE`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "user" => {
                let user = value.trim();
                if user.is_empty() {
                    return Err(JournoError::Config("User cannot be empty".to_string()));
                }
                self.user = user.to_string();
            }
            "renderer" => {
                if value.trim().is_empty() {
                    return Err(JournoError::Config("Renderer cannot be empty".to_string()));
                }
                self.renderer = value.trim().to_string();
            }
            "render_timeout_secs" => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    JournoError::Config(format!("Invalid timeout: '{}'", value))
                })?;
                if secs == 0 {
                    return Err(JournoError::Config(
                        "Render timeout must be at least 1 second".to_string(),
                    ));
                }
                self.render_timeout_secs = secs;
            }
            "created" => {
                return Err(JournoError::Config("'created' is read-only".to_string()));
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// All keys with their values, in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user", self.user.clone()),
            ("renderer", self.renderer.clone()),
            ("render_timeout_secs", self.render_timeout_secs.to_string()),
            ("created", self.created.to_rfc3339()),
        ]
    }

    fn detect_default_user() -> String {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| "journo".to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_key(key: &str) -> JournoError {
    JournoError::Config(format!(
        "Unknown config key: '{}'. Valid keys: user, renderer, render_timeout_secs, created",
        key
    ))
}
