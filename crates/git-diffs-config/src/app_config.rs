//! Application configuration
//!
//! Configuration loaded from .git-diffs.toml file.

use anyhow::{Context, Result};
use git_diffs_engine::{normalize_query, DiffViewState, FileListState, GroupingMode, ViewMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Branches tried, in order, when no base branch is configured.
pub const DEFAULT_BASE_CANDIDATES: [&str; 4] = ["main", "master", "origin/main", "origin/master"];

/// Application configuration loaded from .git-diffs.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Branch to compare against; detected from the repository when unset
    #[serde(default)]
    pub base_branch: Option<String>,

    /// Initial grouping of the file list ("folder", "type" or "raw")
    #[serde(default)]
    pub file_list_mode: GroupingMode,

    /// Initial diff view ("both", "new" or "old")
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Expand every folder when the file list is loaded
    #[serde(default = "default_true")]
    pub expand_folders: bool,

    /// Remove spaces from content search queries
    #[serde(default = "default_true")]
    pub strip_query_spaces: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_branch: None,
            file_list_mode: GroupingMode::default(),
            view_mode: ViewMode::default(),
            expand_folders: default_true(),
            strip_query_spaces: default_true(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {:#}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid git-diffs config")
    }

    /// Write the config to the platform config directory
    pub fn save(&self) -> Result<()> {
        let dir = crate::paths::ensure_config_dir()?;
        self.save_to(&dir.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Saved app config to {}", path.display());
        Ok(())
    }

    /// Base branches to try, configured one first
    pub fn base_candidates(&self) -> Vec<String> {
        match &self.base_branch {
            Some(branch) if !branch.trim().is_empty() => vec![branch.trim().to_string()],
            _ => DEFAULT_BASE_CANDIDATES
                .iter()
                .map(|b| b.to_string())
                .collect(),
        }
    }

    /// File list state initialized with the configured mode and options
    pub fn file_list_state(&self) -> FileListState {
        FileListState::default()
            .with_expand_folders(self.expand_folders)
            .with_mode(self.file_list_mode)
    }

    pub fn diff_view_state(&self) -> DiffViewState {
        DiffViewState::new(self.view_mode)
    }

    /// Content search query with the configured space handling applied
    pub fn search_query(&self, query: &str) -> String {
        normalize_query(query, self.strip_query_spaces)
    }
}
