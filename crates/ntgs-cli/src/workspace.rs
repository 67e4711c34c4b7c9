//! Workspace discovery, settings and session persistence for CLI commands

use crate::errors;
use anyhow::{Context, Result};
use ntgs_core::config::{CliConfigOverrides, LayeredConfig};
use ntgs_core::session::SessionFile;
use ntgs_core::ConfigurationState;
use std::path::{Path, PathBuf};

pub const WORKSPACE_DIR: &str = ".ntgs";
pub const CONFIG_FILE: &str = "config.toml";
pub const SESSION_FILE: &str = "session.json";

/// An opened `.ntgs` workspace
pub struct Workspace {
    pub root: PathBuf,
    pub settings: LayeredConfig,
    pub session: SessionFile,
}

impl Workspace {
    /// Open the workspace containing the current directory
    pub fn open(overrides: CliConfigOverrides) -> Result<Self> {
        let root = find_workspace_root()?;
        let settings = load_settings(&root, overrides)?;

        let session_path = session_path(&root);
        let session = SessionFile::load(&session_path)
            .with_context(|| format!("Failed to load session from {}", session_path.display()))?;

        Ok(Self { root, settings, session })
    }

    pub fn session_path(&self) -> PathBuf {
        session_path(&self.root)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR).join(CONFIG_FILE)
    }

    /// Configuration state restored from the session
    pub fn state(&self) -> ConfigurationState {
        self.session.state()
    }

    /// Data type named on the command line, or the configured default
    pub fn data_type_or_default(&self, data_type: Option<String>) -> String {
        data_type.unwrap_or_else(|| self.settings.default_data_type.value.clone())
    }

    /// Replace the session configuration with `state` and write it out
    pub fn commit(&mut self, state: &ConfigurationState) -> Result<()> {
        let layers = std::mem::take(&mut self.session.layers);
        self.session = SessionFile::from_state(state, layers);
        self.save()
    }

    /// Write the session as it is
    pub fn save(&self) -> Result<()> {
        let path = self.session_path();
        self.session
            .save(&path)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;
        tracing::info!("Session saved to {}", path.display());
        Ok(())
    }
}

pub fn session_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_DIR).join(SESSION_FILE)
}

/// Load layered settings for a workspace
pub fn load_settings(root: &Path, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let config_path = root.join(WORKSPACE_DIR).join(CONFIG_FILE);

    let config = if config_path.exists() {
        LayeredConfig::with_defaults()
            .load_from_file(&config_path)
            .context("Failed to load configuration file")?
    } else {
        tracing::debug!("No {} found, using default settings", config_path.display());
        LayeredConfig::with_defaults()
    };

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

/// Find the workspace root by looking for .ntgs directory
pub fn find_workspace_root() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let ntgs_dir = current.join(WORKSPACE_DIR);
        if ntgs_dir.is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(errors::workspace_not_found().into());
        }
    }
}
