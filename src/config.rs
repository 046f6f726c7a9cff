//! Loader configuration
//!
//! Reads `node_pack_loader.yaml` from the config directory. Every field has
//! a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use node_pack_core::LayoutSettings;
use node_pack_sidebar::SettlePolicy;

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "node_pack_loader.yaml";

/// Demo registry file name inside the config directory
pub const REGISTRY_FILE: &str = "demo_registry.yaml";

/// Environment variable naming the config directory
pub const CONFIG_DIR_ENV: &str = "NODE_PACK_CONFIG";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("layout.zoom must be finite and positive, got {0}")]
    InvalidZoom(f32),
    #[error("layout.padding must be finite and not negative, got {0}")]
    InvalidPadding(f32),
    #[error("window.{field} must be finite and positive, got {value}")]
    InvalidWindow { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub layout: LayoutSettings,
    pub settle: SettleConfig,
    pub window: WindowConfig,
}

impl LoaderConfig {
    /// Reject values that would break layout or the camera fit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let LayoutSettings { padding, zoom, .. } = self.layout;
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(ConfigError::InvalidZoom(zoom));
        }
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(ConfigError::InvalidPadding(padding));
        }
        for (field, value) in [("width", self.window.width), ("height", self.window.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidWindow { field, value });
            }
        }
        Ok(())
    }
}

/// Settle timing in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleConfig {
    pub delay_ms: u64,
    pub max_wait_ms: u64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        let policy = SettlePolicy::default();
        Self {
            delay_ms: policy.delay.as_millis() as u64,
            max_wait_ms: policy.max_wait.as_millis() as u64,
        }
    }
}

impl SettleConfig {
    /// `max_wait` is never shorter than `delay`.
    pub fn policy(&self) -> SettlePolicy {
        SettlePolicy {
            delay: Duration::from_millis(self.delay_ms),
            max_wait: Duration::from_millis(self.max_wait_ms.max(self.delay_ms)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub sidebar_width: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            sidebar_width: 250.0,
        }
    }
}

impl WindowConfig {
    /// Size of the canvas area next to the sidebar
    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2((self.width - self.sidebar_width).max(0.0), self.height)
    }
}

pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Create loader from NODE_PACK_CONFIG or default to "config"
    ///
    /// Path resolution order:
    /// 1. NODE_PACK_CONFIG environment variable (explicit override)
    /// 2. Relative "config" path (works when running from the workspace root)
    /// 3. Compile-time CARGO_MANIFEST_DIR/config
    pub fn from_env() -> Self {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Self::new(dir);
        }

        if Path::new("config").join(CONFIG_FILE).exists() {
            return Self::new("config");
        }

        let compile_time_config = concat!(env!("CARGO_MANIFEST_DIR"), "/config");
        if Path::new(compile_time_config).join(CONFIG_FILE).exists() {
            return Self::new(compile_time_config);
        }

        // Last resort - defaults are used when the file is missing
        Self::new("config")
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.config_dir.join(REGISTRY_FILE)
    }

    /// Load `node_pack_loader.yaml`, or defaults when it does not exist
    pub fn load_config(&self) -> Result<LoaderConfig> {
        let path = self.config_path();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(LoaderConfig::default());
        }
        Self::load_config_file(&path)
    }

    /// Load an explicit config file; a missing file is an error here
    pub fn load_config_file(path: &Path) -> Result<LoaderConfig> {
        info!("Loading loader configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: LoaderConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }
}
