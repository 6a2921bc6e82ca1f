//! CLI configuration, loaded from .rectnav/config.yaml

use std::path::Path;

use anyhow::{Context, Result};
use rectnav::{NavConfig, WorldBounds};
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = ".rectnav/config.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Config version
    pub version: Option<String>,

    /// Navigable area
    pub world: WorldBounds,

    /// Planner and controller tuning
    pub nav: NavConfig,

    /// Simulated agent defaults, overridable per command
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub body_radius: f32,
    pub linear_speed: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            body_radius: 20.0,
            linear_speed: 2.0,
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from project root, falling back to defaults when no config file exists
    pub fn load_from_project(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_PATH);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}
