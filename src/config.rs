use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServerProfile {
    pub name: String,
    pub url: String,
}

impl ServerProfile {
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.url)
            .with_context(|| format!("invalid url '{}' for server '{}'", self.url, self.name))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MenuSettings {
    pub delete_dialog_delay_ms: u64,
    pub refresh_limit: u32,
    pub request_timeout_secs: u64,
}

impl Default for MenuSettings {
    fn default() -> Self {
        MenuSettings {
            delete_dialog_delay_ms: 200,
            refresh_limit: 24,
            request_timeout_secs: 30,
        }
    }
}

impl MenuSettings {
    pub fn delete_dialog_delay(&self) -> Duration {
        Duration::from_millis(self.delete_dialog_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub servers: Vec<ServerProfile>,
    #[serde(default)]
    pub menu: MenuSettings,
}

impl Config {
    fn default_config() -> Self {
        Config {
            servers: vec![ServerProfile {
                name: "Local".to_string(),
                url: "http://127.0.0.1:8888".to_string(),
            }],
            menu: MenuSettings::default(),
        }
    }

    /// Loads the config from `path`, or from the per-user config directory when
    /// `path` is `None`. Only the per-user file is created when missing.
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            return Self::read_from(path).unwrap_or_else(|e| {
                warn!("{:#}. Using default in-memory config.", e);
                Self::default_config()
            });
        }

        let Some(base_dirs) = directories::BaseDirs::new() else {
            warn!("Could not determine config directory. Using default in-memory config.");
            return Self::default_config();
        };
        let config_dir = base_dirs.config_dir().join("recmenu");
        let config_file_path = config_dir.join("recmenu.toml");

        if config_file_path.exists() {
            return Self::read_from(&config_file_path).unwrap_or_else(|e| {
                warn!("{:#}. Using default in-memory config.", e);
                Self::default_config()
            });
        }

        info!(
            "Config file not found at '{}'. Attempting to create a default one.",
            config_file_path.display()
        );
        let default_cfg = Self::default_config();
        if let Err(e) = default_cfg.write_to(&config_dir, &config_file_path) {
            warn!("{:#}", e);
        } else {
            info!("Default config file created at '{}'", config_file_path.display());
        }
        default_cfg
    }

    fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file at '{}'", path.display()))?;
        if config.servers.is_empty() {
            config.servers = Self::default_config().servers;
        }
        Ok(config)
    }

    fn write_to(&self, dir: &Path, path: &Path) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize default config")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory '{}'", dir.display()))?;
        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write default config file to '{}'", path.display()))
    }

    /// Picks the named server, or the first configured one.
    pub fn server(&self, name: Option<&str>) -> Result<&ServerProfile> {
        match name {
            Some(name) => self
                .servers
                .iter()
                .find(|s| s.name == name)
                .ok_or_else(|| anyhow!("Server '{}' not found in configuration.", name)),
            None => self
                .servers
                .first()
                .ok_or_else(|| anyhow!("No servers configured.")),
        }
    }
}
