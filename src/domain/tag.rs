use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that turns a semantic version into a release tag (e.g. "my-app@v")
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPrefix {
    prefix: String,
}

impl TagPrefix {
    /// Create a prefix from a literal string
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPrefix {
            prefix: prefix.into(),
        }
    }

    /// Compose a prefix from an optional app name, its separator and the "v" marker.
    ///
    /// Without an app the separator is ignored: the prefix is either "v" or empty.
    pub fn compose(app: Option<&str>, separator: &str, with_v: bool) -> Self {
        let version_prefix = if with_v { "v" } else { "" };
        match app.filter(|name| !name.is_empty()) {
            Some(name) => TagPrefix::new(format!("{}{}{}", name, separator, version_prefix)),
            None => TagPrefix::new(version_prefix),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Whether a tag lives under this prefix
    pub fn matches(&self, tag: &str) -> bool {
        tag.starts_with(&self.prefix)
    }

    /// Version part of a tag ("app@1.2.3" -> "1.2.3"); foreign tags are returned as-is
    pub fn strip<'a>(&self, tag: &'a str) -> &'a str {
        tag.strip_prefix(self.prefix.as_str()).unwrap_or(tag)
    }

    /// Tag for a version ("1.2.3" -> "app@1.2.3")
    pub fn tag_for(&self, version: impl fmt::Display) -> String {
        format!("{}{}", self.prefix, version)
    }
}

impl fmt::Display for TagPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// One entry of a release listing
///
/// Field names follow the GitHub releases API so listings can be deserialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseTagSummary {
    #[serde(default)]
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
}

impl ReleaseTagSummary {
    pub fn new(id: u64, tag_name: impl Into<String>, draft: bool, prerelease: bool) -> Self {
        ReleaseTagSummary {
            id,
            tag_name: tag_name.into(),
            draft,
            prerelease,
        }
    }

    /// A non-draft, non-prerelease release
    pub fn published(id: u64, tag_name: impl Into<String>) -> Self {
        Self::new(id, tag_name, false, false)
    }

    pub fn is_published(&self) -> bool {
        !self.draft && !self.prerelease
    }
}
