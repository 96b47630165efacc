//! Global context for Jalno operations.
//!
//! Provides centralized access to the project root and configuration paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, load_config, Config, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Project root (the directory holding `composer.json`)
    root: PathBuf,

    /// Home directory for global Jalno settings (~/.jalno/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = config::global_config_dir().unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));

        Ok(GlobalContext {
            root: cwd.clone(),
            cwd,
            home,
        })
    }

    /// Create a GlobalContext for an explicit project root.
    ///
    /// A relative root is taken relative to the working directory.
    pub fn with_root(root: Option<PathBuf>) -> Result<Self> {
        let mut ctx = Self::new()?;
        match root {
            Some(root) => {
                let root = if root.is_absolute() {
                    root
                } else {
                    ctx.cwd.join(root)
                };
                if !root.is_dir() {
                    anyhow::bail!("project root does not exist: {}", root.display());
                }
                ctx.root = root;
            }
            None => {
                tracing::debug!("Using working directory as project root: {}", ctx.root.display());
            }
        }
        Ok(ctx)
    }

    /// Get the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE_NAME)
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.root)
    }

    /// Load the merged global and project configuration.
    pub fn config(&self) -> Result<Config> {
        load_config(&self.global_config_path(), &self.project_config_path())
    }
}
