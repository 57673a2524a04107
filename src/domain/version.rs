//! Semantic version arithmetic
//!
//! Increments follow the same rules as the npm `semver` package so that tags
//! produced here line up with tags produced by JavaScript release tooling:
//! bumping a prerelease towards its own release drops the prerelease instead
//! of incrementing again.

use crate::error::{ReleaseError, Result};
use semver::{Prerelease, Version};
use serde::Serialize;
use std::fmt;

/// Prerelease label used for release candidates
pub const RELEASE_CANDIDATE: &str = "rc";

/// Version bump type decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    #[default]
    Patch,
    Minor,
    Major,
    Prerelease,
}

impl BumpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
            BumpType::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a bare semantic version (no tag prefix)
pub fn parse_version(raw: &str) -> Result<Version> {
    Version::parse(raw)
        .map_err(|e| ReleaseError::version(format!("Invalid version '{}': {}", raw, e)))
}

/// Precedence key: build metadata never takes part in ordering
pub fn precedence(version: &Version) -> (u64, u64, u64, &Prerelease) {
    (version.major, version.minor, version.patch, &version.pre)
}

/// Increment a version according to the bump type.
///
/// Returns `None` when a component would overflow.
///
/// # Example
/// ```
/// # use git_release::domain::version::{increment, BumpType};
/// let v = semver::Version::parse("1.2.3").unwrap();
/// assert_eq!(increment(&v, BumpType::Minor).unwrap().to_string(), "1.3.0");
/// assert_eq!(increment(&v, BumpType::Prerelease).unwrap().to_string(), "1.2.4-rc.0");
/// ```
pub fn increment(version: &Version, bump: BumpType) -> Option<Version> {
    let mut next = Version::new(version.major, version.minor, version.patch);
    let has_pre = !version.pre.is_empty();

    match bump {
        BumpType::Major => {
            if !(has_pre && version.minor == 0 && version.patch == 0) {
                next.major = version.major.checked_add(1)?;
                next.minor = 0;
                next.patch = 0;
            }
        }
        BumpType::Minor => {
            if !(has_pre && version.patch == 0) {
                next.minor = version.minor.checked_add(1)?;
                next.patch = 0;
            }
        }
        BumpType::Patch => {
            if !has_pre {
                next.patch = version.patch.checked_add(1)?;
            }
        }
        BumpType::Prerelease => {
            if has_pre {
                next.pre = next_release_candidate(&version.pre)?;
            } else {
                next.patch = version.patch.checked_add(1)?;
                next.pre = first_release_candidate()?;
            }
        }
    }

    Some(next)
}

fn first_release_candidate() -> Option<Prerelease> {
    Prerelease::new(&format!("{}.0", RELEASE_CANDIDATE)).ok()
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

/// `rc.N` counts up on its last numeric identifier, any other label restarts at `rc.0`
fn next_release_candidate(pre: &Prerelease) -> Option<Prerelease> {
    let mut identifiers: Vec<String> = pre.as_str().split('.').map(str::to_string).collect();

    let numbered_candidate = identifiers.first().map(String::as_str) == Some(RELEASE_CANDIDATE)
        && identifiers.get(1).is_some_and(|id| is_numeric(id));
    if !numbered_candidate {
        return first_release_candidate();
    }

    let last = identifiers.iter().rposition(|id| is_numeric(id))?;
    let counter: u64 = identifiers[last].parse().ok()?;
    identifiers[last] = counter.checked_add(1)?.to_string();

    Prerelease::new(&identifiers.join(".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(raw: &str, bump_type: BumpType) -> String {
        let version = parse_version(raw).unwrap();
        increment(&version, bump_type).unwrap().to_string()
    }

    #[test]
    fn test_version_bump_major() {
        assert_eq!(bump("1.2.3", BumpType::Major), "2.0.0");
    }

    #[test]
    fn test_version_bump_minor() {
        assert_eq!(bump("1.2.3", BumpType::Minor), "1.3.0");
        assert_eq!(bump("0.0.0", BumpType::Minor), "0.1.0");
    }

    #[test]
    fn test_version_bump_patch() {
        assert_eq!(bump("1.2.3", BumpType::Patch), "1.2.4");
    }

    #[test]
    fn test_bump_from_prerelease_drops_label() {
        assert_eq!(bump("0.1.3-rc.3", BumpType::Patch), "0.1.3");
        assert_eq!(bump("0.2.0-rc.1", BumpType::Minor), "0.2.0");
        assert_eq!(bump("2.0.0-rc.1", BumpType::Major), "2.0.0");
    }

    #[test]
    fn test_bump_from_prerelease_with_nonzero_lower_parts() {
        assert_eq!(bump("0.1.3-rc.3", BumpType::Minor), "0.2.0");
        assert_eq!(bump("0.1.3-rc.3", BumpType::Major), "1.0.0");
    }

    #[test]
    fn test_prerelease_from_release() {
        assert_eq!(bump("0.1.4", BumpType::Prerelease), "0.1.5-rc.0");
        assert_eq!(bump("0.0.0", BumpType::Prerelease), "0.0.1-rc.0");
    }

    #[test]
    fn test_prerelease_counts_up() {
        assert_eq!(bump("0.1.3-rc.3", BumpType::Prerelease), "0.1.3-rc.4");
        assert_eq!(bump("1.0.0-rc.9", BumpType::Prerelease), "1.0.0-rc.10");
    }

    #[test]
    fn test_prerelease_restarts_on_other_label() {
        assert_eq!(bump("1.0.0-beta.2", BumpType::Prerelease), "1.0.0-rc.0");
        assert_eq!(bump("1.0.0-rc", BumpType::Prerelease), "1.0.0-rc.0");
    }

    #[test]
    fn test_build_metadata_dropped() {
        assert_eq!(bump("1.0.0+build.5", BumpType::Patch), "1.0.1");
    }

    #[test]
    fn test_overflow_yields_none() {
        let version = Version::new(1, u64::MAX, 0);
        assert!(increment(&version, BumpType::Minor).is_none());
    }

    #[test]
    fn test_precedence_ignores_build() {
        let a = parse_version("1.0.0+a").unwrap();
        let b = parse_version("1.0.0+b").unwrap();
        assert_eq!(precedence(&a), precedence(&b));

        let rc = parse_version("1.0.0-rc.1").unwrap();
        assert!(precedence(&rc) < precedence(&a));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_version("1.2").is_err());
        assert!(parse_version("not-a-version").is_err());
    }

    #[test]
    fn test_bump_type_display() {
        assert_eq!(BumpType::Prerelease.to_string(), "prerelease");
        assert_eq!(BumpType::default(), BumpType::Patch);
    }
}
