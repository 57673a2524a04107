//! Changelog generation
//!
//! Commits flow through three stages:
//!
//! - [classifier::CommitClassifier] expands squash commits and partitions the
//!   fragments into conventional-commit categories
//! - [references::ReferenceExtractor] turns each retained commit into a
//!   markdown line and collects tasks, pull requests and contributors
//! - [renderer::ChangelogRenderer] lays the lines out and settles the bump type
//!
//! [generate] wires the three together.

pub mod classifier;
pub mod references;
pub mod renderer;

pub use classifier::{CategoryGroup, Classification, CommitClassifier};
pub use references::{ExtractedReferences, ReferenceExtractor};
pub use renderer::{ChangelogRenderer, ChangelogReport};

use crate::domain::{CommitRecord, RepoSlug};
use crate::error::Result;
use tracing::debug;

/// Default task key prefix
pub const DEFAULT_TASK_PREFIX: &str = "JIR-";

/// Settings for one changelog pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogOptions {
    pub task_prefix: String,
    /// Falls back to the owner's Atlassian browse URL
    pub task_base_url: Option<String>,
    /// Only commits carrying `(scope):` are kept
    pub commit_scope: Option<String>,
}

impl Default for ChangelogOptions {
    fn default() -> Self {
        ChangelogOptions {
            task_prefix: DEFAULT_TASK_PREFIX.to_string(),
            task_base_url: None,
            commit_scope: None,
        }
    }
}

/// Classify and render `commits` into a changelog report
pub fn generate(
    commits: &[CommitRecord],
    options: &ChangelogOptions,
    slug: &RepoSlug,
) -> Result<ChangelogReport> {
    let task_base_url = options
        .task_base_url
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| slug.default_task_base_url());
    let extractor = ReferenceExtractor::new(&options.task_prefix, task_base_url)?;

    let classification = CommitClassifier::new(options.commit_scope.clone()).classify(commits);
    debug!(
        "Classified {} commits into {} changelog entries",
        commits.len(),
        classification.len()
    );

    Ok(ChangelogRenderer::new(extractor, slug).render(&classification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BumpType;

    const SHA: &str = "62ec8ea713fdf14e4abaef3d7d5138194dec49ce";

    fn commit(message: &str) -> CommitRecord {
        CommitRecord::new(SHA, "https://commiturl", message)
            .with_author("darioblanco", "https://authorurl")
    }

    fn slug() -> RepoSlug {
        RepoSlug::github("theowner", "therepo")
    }

    const SQUASH: &str = "feat(auth): main commit of my PR [JIRA-2772] (#1716)\n\n\
        * feat(auth): set login endpoint controller\n\n\
        * test(auth): add integration test for login endpoint #MAJOR\n\n\
        * fix(auth): set secure and http only options [JIRA-2773]\n\n\
        * perf(auth): add additional fake performance\n\n\
        This is the body of the previous commit\n\n\
        And this is the footer\n\n\
        * (auth): Set values for staging and production\n\n\
        * Address comment from PR\n\n\
        This is the body of the previous commit\n\n\
        * feat(auth): set expiration of the cookie to the amount of time of the token\n\n\
        * fix(auth): remove joi validation since it does not accept localhost\n\n";

    #[test]
    fn test_squash_commit_with_scope() {
        let options = ChangelogOptions {
            task_prefix: "JIRA-".to_string(),
            task_base_url: Some("base".to_string()),
            commit_scope: Some("auth".to_string()),
        };

        let report = generate(&[commit(SQUASH)], &options, &slug()).unwrap();

        assert_eq!(report.shas, vec![SHA; 8]);
        assert_eq!(report.tasks, vec!["JIRA-2772", "JIRA-2773"]);
        assert_eq!(report.pull_requests, vec!["1716"]);
        assert_eq!(report.bump, BumpType::Major);
        assert_eq!(
            report.task_links,
            "[JIRA-2772](base/JIRA-2772), [JIRA-2773](base/JIRA-2773)"
        );
        assert_eq!(
            report.pull_request_links,
            "[#1716](https://github.com/theowner/therepo/pull/1716)"
        );
        assert_eq!(report.contributors, vec!["@darioblanco"]);
        assert!(report
            .changes
            .starts_with("- Set values for staging and production - [62ec8ea7]"));
        assert!(!report.changes.contains("Address comment from PR"));
    }

    #[test]
    fn test_required_scope() {
        let options = ChangelogOptions {
            commit_scope: Some("my-app".to_string()),
            ..ChangelogOptions::default()
        };
        let commits = vec![
            commit("feat:super feature"),
            commit("docs(my-app): document everything"),
            commit("fix: My fix"),
            commit("refactor(my-app): one does not simply refactor"),
        ];

        let report = generate(&commits, &options, &slug()).unwrap();

        assert_eq!(report.shas.len(), 2);
        assert_eq!(report.bump, BumpType::Patch);
    }

    #[test]
    fn test_default_task_base_url_uses_owner() {
        let options = ChangelogOptions::default();
        let report = generate(&[commit("fix: a [JIR-5]")], &options, &slug()).unwrap();
        assert_eq!(
            report.task_links,
            "[JIR-5](https://theowner.atlassian.net/browse/JIR-5)"
        );
    }

    #[test]
    fn test_feature_commit_requests_minor() {
        let commits = vec![commit("feat: a"), commit("fix: b")];
        let report = generate(&commits, &ChangelogOptions::default(), &slug()).unwrap();
        assert_eq!(report.bump, BumpType::Minor);
    }
}
