//! Release body templates

use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory that relative template paths resolve under
pub const TEMPLATE_DIR: &str = ".github";

/// Values substituted into a release body template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseBodyContext<'a> {
    pub app: &'a str,
    pub version: &'a str,
    pub changes: &'a str,
    pub tasks: &'a str,
    pub pull_requests: &'a str,
}

/// Replace every `$APP`, `$VERSION`, `$CHANGES`, `$TASKS` and `$PULL_REQUESTS`
pub fn render_release_body(template: &str, context: &ReleaseBodyContext<'_>) -> String {
    template
        .replace("$APP", context.app)
        .replace("$VERSION", context.version)
        .replace("$CHANGES", context.changes)
        .replace("$TASKS", context.tasks)
        .replace("$PULL_REQUESTS", context.pull_requests)
}

/// Path of a template; relative paths live under the repository's `.github` directory
pub fn template_location(template_path: &str, repo_root: &Path) -> PathBuf {
    let path = Path::new(template_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(TEMPLATE_DIR).join(path)
    }
}

/// Read a release body template
pub fn load_template(template_path: &str, repo_root: &Path) -> Result<String> {
    let location = template_location(template_path, repo_root);
    debug!("Loading release template from {}", location.display());

    fs::read_to_string(&location).map_err(|e| {
        ReleaseError::template(format!("Cannot read {}: {}", location.display(), e))
    })
}
