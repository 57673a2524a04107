use crate::domain::version::{increment, parse_version, precedence};
use crate::domain::{BumpType, ReleaseTagSummary, TagPrefix};
use crate::error::{ReleaseError, Result};
use crate::source::ReleaseSource;
use semver::Version;
use serde::Serialize;
use tracing::{debug, warn};

/// Parameters of a version bump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpRequest {
    pub bump: BumpType,
    /// Last production tag; also the baseline for bump protection
    pub last_released_tag: Option<String>,
    /// Never bump minor or major twice on top of the same production release
    pub bump_protection: bool,
}

/// Result of a version bump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpOutcome {
    pub previous_tag: String,
    pub previous_version: String,
    pub new_tag: String,
    pub new_version: String,
    /// Bump type actually applied, after protection
    pub release_type: BumpType,
}

/// Resolves released versions and computes the next one from a release listing
pub struct VersionResolver<'a, S: ReleaseSource> {
    source: &'a S,
}

impl<'a, S: ReleaseSource> VersionResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        VersionResolver { source }
    }

    /// Highest version tag among the releases accepted by `predicate`.
    ///
    /// Pages come in no particular order, so the whole listing is always read.
    /// Tags whose remainder after `prefix` is not a semantic version are skipped.
    pub fn find_highest_release_tag<P>(
        &self,
        prefix: &TagPrefix,
        predicate: P,
    ) -> Result<Option<String>>
    where
        P: Fn(&ReleaseTagSummary) -> bool,
    {
        let mut highest: Option<(Version, String)> = None;

        for page in self.source.list_releases()? {
            for release in page? {
                if !predicate(&release) {
                    continue;
                }

                let version = match parse_version(prefix.strip(&release.tag_name)) {
                    Ok(version) => version,
                    Err(e) => {
                        warn!("Skipping release {}: {}", release.tag_name, e);
                        continue;
                    }
                };

                let is_higher = highest
                    .as_ref()
                    .map_or(true, |(best, _)| precedence(&version) > precedence(best));
                if is_higher {
                    highest = Some((version, release.tag_name));
                }
            }
        }

        Ok(highest.map(|(_, tag)| tag))
    }

    /// Highest published (neither draft nor prerelease) tag under `prefix`
    pub fn retrieve_last_released_version(&self, prefix: &TagPrefix) -> Result<Option<String>> {
        let tag = self.find_highest_release_tag(prefix, |release| {
            debug!("Evaluating if \"{}\" has been released", release.tag_name);
            release.is_published() && prefix.matches(&release.tag_name)
        })?;
        debug!("Last released tag: {}", tag.as_deref().unwrap_or("<none>"));
        Ok(tag)
    }

    /// Compute the next tag under `prefix`
    pub fn bump_version(&self, prefix: &TagPrefix, request: BumpRequest) -> Result<BumpOutcome> {
        let baseline = match &request.last_released_tag {
            Some(tag) if request.bump_protection => Some(tag.as_str()),
            _ => None,
        };

        let previous_tag = match (baseline, &request.last_released_tag) {
            // Internal tags may already be ahead of the production baseline
            (Some(baseline), _) => self
                .find_highest_release_tag(prefix, |release| prefix.matches(&release.tag_name))?
                .unwrap_or_else(|| baseline.to_string()),
            (None, Some(tag)) => tag.clone(),
            (None, None) => match self.retrieve_last_released_version(prefix)? {
                Some(tag) => tag,
                None => prefix.tag_for("0.0.0"),
            },
        };
        debug!("Detected \"{}\" as the latest tag", previous_tag);

        let previous_version = prefix.strip(&previous_tag).to_string();
        let last = parse_version(&previous_version)
            .map_err(|_| ReleaseError::increment(request.bump, previous_version.as_str()))?;

        let mut release_type = request.bump;
        if let Some(baseline) = baseline {
            if is_protected(&last, prefix.strip(baseline), release_type) {
                debug!("Bump protection triggered, defining release type as PATCH");
                release_type = BumpType::Patch;
            }
        }

        let next = increment(&last, release_type)
            .ok_or_else(|| ReleaseError::increment(release_type, previous_version.as_str()))?;
        let new_version = next.to_string();
        let new_tag = prefix.tag_for(&new_version);
        debug!("New tag: {}", new_tag);

        Ok(BumpOutcome {
            previous_tag,
            previous_version,
            new_tag,
            new_version,
            release_type,
        })
    }
}

/// Whether a minor or major bump already happened since the baseline
fn is_protected(last: &Version, baseline: &str, bump: BumpType) -> bool {
    let baseline = match parse_version(baseline) {
        Ok(version) => version,
        Err(e) => {
            warn!("Ignoring bump protection: {}", e);
            return false;
        }
    };

    match bump {
        BumpType::Minor => (last.major, last.minor) > (baseline.major, baseline.minor),
        BumpType::Major => last.major > baseline.major,
        BumpType::Patch | BumpType::Prerelease => false,
    }
}
