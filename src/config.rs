use crate::changelog::{ChangelogOptions, DEFAULT_TASK_PREFIX};
use crate::domain::{RepoSlug, TagPrefix};
use crate::error::{ReleaseError, Result};
use crate::source::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the complete configuration for git-release.
///
/// Contains the hosted repository coordinates, tag and release settings, changelog
/// settings, and the author email to login map.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Author email -> hosting-service login
    #[serde(default)]
    pub authors: HashMap<String, String>,
}

fn default_host() -> String {
    "https://github.com".to_string()
}

fn default_separator() -> String {
    "@".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_task_prefix() -> String {
    DEFAULT_TASK_PREFIX.to_string()
}

/// Where the repository is hosted; used to build commit, user and pull request links.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub name: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            host: default_host(),
            owner: String::new(),
            name: String::new(),
        }
    }
}

/// Tag naming and release behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// App name for monorepo tags such as "my-app@1.2.0"
    #[serde(default)]
    pub app: Option<String>,

    #[serde(default = "default_separator")]
    pub app_tag_separator: String,

    #[serde(default)]
    pub with_v: bool,

    #[serde(default)]
    pub bump_protection: bool,

    /// Release body template, relative paths resolve under `.github/`
    #[serde(default)]
    pub template_path: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            app: None,
            app_tag_separator: default_separator(),
            with_v: false,
            bump_protection: false,
            template_path: None,
            page_size: default_page_size(),
            remote: default_remote(),
        }
    }
}

/// Changelog generation settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_task_prefix")]
    pub task_prefix: String,

    #[serde(default)]
    pub task_base_url: Option<String>,

    /// Only commits with this scope make it into the changelog
    #[serde(default)]
    pub commit_scope: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            task_prefix: default_task_prefix(),
            task_base_url: None,
            commit_scope: None,
        }
    }
}

impl Config {
    /// Tag prefix composed from the app name, its separator and the "v" marker
    pub fn tag_prefix(&self) -> TagPrefix {
        TagPrefix::compose(
            self.release.app.as_deref(),
            &self.release.app_tag_separator,
            self.release.with_v,
        )
    }

    pub fn repo_slug(&self) -> RepoSlug {
        RepoSlug::new(
            self.repository.host.as_str(),
            self.repository.owner.as_str(),
            self.repository.name.as_str(),
        )
    }

    /// Changelog settings; without an explicit scope, an app only keeps its own `(app):` commits
    pub fn changelog_options(&self) -> ChangelogOptions {
        let commit_scope = self
            .changelog
            .commit_scope
            .clone()
            .filter(|scope| !scope.is_empty())
            .or_else(|| self.release.app.clone().filter(|app| !app.is_empty()));

        ChangelogOptions {
            task_prefix: self.changelog.task_prefix.clone(),
            task_base_url: self.changelog.task_base_url.clone(),
            commit_scope,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => find_config_file(),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path)?;
    toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new("./gitrelease.toml");
    if local.exists() {
        return Some(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join(".gitrelease.toml"))
        .filter(|path| path.exists())
}
