//! Release workflow orchestration
//!
//! Ties the changelog and version engines to the repository collaborators.
//! Kept apart from `main.rs` so the workflow can run against any
//! [CommitSource] + [ReleaseSource] + [TagSink], the in-memory mock included.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::analyzer::{BumpRequest, VersionResolver};
use crate::boundary::BoundaryWarning;
use crate::changelog::{self, ChangelogReport};
use crate::config::Config;
use crate::domain::BumpType;
use crate::outputs::ReleaseOutputs;
use crate::release::{self, ReleaseBodyContext};
use crate::source::{CommitSource, ReleaseSource, TagSink};

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Base tag override; defaults to the last released tag
    pub base_tag: Option<String>,

    /// Release tag override; skips the version bump
    pub release_tag: Option<String>,

    /// Release name override; defaults to the release tag
    pub release_name: Option<String>,

    /// Head reference of the commit range
    pub head: String,

    /// Release as a prerelease, which forces a release candidate bump
    pub prerelease: bool,

    pub draft: bool,

    /// Create the release tag and push it to the configured remote
    pub push_tag: bool,

    /// Preview mode - don't create or push tags
    pub dry_run: bool,

    /// Repository root that relative template paths resolve against
    pub repo_root: PathBuf,
}

impl Default for ReleaseWorkflowArgs {
    fn default() -> Self {
        ReleaseWorkflowArgs {
            base_tag: None,
            release_tag: None,
            release_name: None,
            head: "HEAD".to_string(),
            prerelease: false,
            draft: false,
            push_tag: false,
            dry_run: false,
            repo_root: PathBuf::from("."),
        }
    }
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub outputs: ReleaseOutputs,

    pub report: ChangelogReport,

    /// Rendered release body
    pub body: String,

    pub release_tag: String,

    pub release_name: String,

    pub draft: bool,

    pub prerelease: bool,

    /// Whether the tag was created and pushed
    pub tag_pushed: bool,

    pub warnings: Vec<BoundaryWarning>,
}

/// Main release workflow
///
/// 1. Resolve the base tag (override or last released version)
/// 2. List and classify the commits since the base tag
/// 3. Resolve the release tag (override or version bump)
/// 4. Optionally create and push the tag; a failed push removes the local tag again
/// 5. Render the release body
///
/// # Arguments
///
/// * `args` - Workflow arguments (overrides, flags, head reference)
/// * `config` - git-release configuration
/// * `repo` - Commit, release and tag collaborator
///
/// # Returns
///
/// Result containing the outputs and release body, or error
pub fn run_release_workflow<R>(
    args: ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
) -> Result<WorkflowResult>
where
    R: CommitSource + ReleaseSource + TagSink,
{
    let prefix = config.tag_prefix();
    let slug = config.repo_slug();
    let resolver = VersionResolver::new(repo);
    let mut warnings = Vec::new();

    let base_tag = match args.base_tag.clone().filter(|tag| !tag.is_empty()) {
        Some(tag) => Some(tag),
        None => resolver
            .retrieve_last_released_version(&prefix)
            .context("Failed to retrieve the last released version")?,
    };
    info!("Base tag: {}", base_tag.as_deref().unwrap_or("<none>"));
    if base_tag.is_none() {
        warnings.push(BoundaryWarning::NoReleasedVersion {
            prefix: prefix.to_string(),
        });
    }

    let commits = repo
        .list_commits(base_tag.as_deref(), &args.head)
        .with_context(|| format!("Failed to list commits up to '{}'", args.head))?;
    info!("Found {} commits", commits.len());

    let report = changelog::generate(&commits, &config.changelog_options(), &slug)?;
    if commits.is_empty() {
        if let Some(tag) = &base_tag {
            warnings.push(BoundaryWarning::NoNewCommits {
                base_tag: tag.clone(),
                head: args.head.clone(),
            });
        }
    } else if report.is_empty() {
        warnings.push(BoundaryWarning::EmptyChangelog {
            commits: commits.len(),
        });
    }

    let mut outputs = ReleaseOutputs::from_report(&report, base_tag.as_deref());

    let bump = if args.prerelease {
        BumpType::Prerelease
    } else {
        report.bump
    };

    let release_tag = match args.release_tag.clone().filter(|tag| !tag.is_empty()) {
        Some(tag) => {
            outputs.new_tag = tag.clone();
            outputs.new_version = prefix.strip(&tag).to_string();
            tag
        }
        None => {
            let outcome = resolver.bump_version(
                &prefix,
                BumpRequest {
                    bump,
                    last_released_tag: base_tag.clone(),
                    bump_protection: config.release.bump_protection,
                },
            )?;
            outputs.set_bump(&outcome);
            outcome.new_tag
        }
    };
    info!("Release tag: {}", release_tag);

    let mut tag_pushed = false;
    if args.push_tag && !args.dry_run {
        repo.create_tag(&release_tag)?;
        if let Err(err) = repo.push_tag(&release_tag, &config.release.remote) {
            if let Err(cleanup) = repo.delete_tag(&release_tag) {
                warn!("Local tag {} left behind: {}", release_tag, cleanup);
            }
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to push tag '{}'", release_tag)));
        }
        info!("Pushed {} to {}", release_tag, config.release.remote);
        tag_pushed = true;
    }

    let release_version = prefix.strip(&release_tag).to_string();
    let release_name = args
        .release_name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| release_tag.clone());
    outputs.release_name = release_name.clone();

    let body = match &config.release.template_path {
        Some(path) => {
            let template = release::load_template(path, &args.repo_root)?;
            release::render_release_body(
                &template,
                &ReleaseBodyContext {
                    app: config.release.app.as_deref().unwrap_or_default(),
                    version: &release_version,
                    changes: &report.changes,
                    tasks: &report.task_links,
                    pull_requests: &report.pull_request_links,
                },
            )
        }
        None => report.changes.clone(),
    };

    outputs.body = body.clone();
    outputs.draft = args.draft;
    outputs.prerelease = args.prerelease;

    Ok(WorkflowResult {
        outputs,
        report,
        body,
        release_tag,
        release_name,
        draft: args.draft,
        prerelease: args.prerelease,
        tag_pushed,
        warnings,
    })
}
