use crate::domain::{CommitRecord, ReleaseTagSummary, RepoSlug};
use crate::error::{ReleaseError, Result};
use crate::source::{CommitSource, ReleasePages, ReleaseSource, TagSink, DEFAULT_PAGE_SIZE};
use git2::{Oid, Repository as Git2Repo, Sort};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// A version core followed by a prerelease label, e.g. "app@1.2.0-rc.1"
static PRERELEASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+-").expect("Invalid regex"));

/// Wrapper around git2::Repository implementing the collaborator traits
///
/// Local tags stand in for hosted releases: none of them is a draft, and a tag
/// whose version carries a prerelease label is reported as a prerelease.
pub struct Git2Repository {
    repo: Git2Repo,
    slug: RepoSlug,
    authors: HashMap<String, String>,
    page_size: usize,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P, slug: RepoSlug) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo, slug))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, slug: RepoSlug) -> Self {
        Git2Repository {
            repo,
            slug,
            authors: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Map of author email to hosting-service login
    pub fn with_authors(mut self, authors: HashMap<String, String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Working directory, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn resolve_commit(&self, reference: &str) -> Result<Oid> {
        // Tag names such as "app@1.0.0" are not valid revspecs
        let object = match self.repo.find_reference(&format!("refs/tags/{}", reference)) {
            Ok(tag) => tag.peel(git2::ObjectType::Commit)?,
            Err(_) => self.repo.revparse_single(reference).map_err(|e| {
                ReleaseError::tag(format!("Cannot resolve '{}': {}", reference, e))
            })?,
        };

        Ok(object.peel_to_commit()?.id())
    }

    fn to_record(&self, commit: &git2::Commit<'_>) -> CommitRecord {
        let sha = commit.id().to_string();
        let message = commit.message().unwrap_or("").to_string();
        let record = CommitRecord::new(sha.as_str(), self.slug.commit_url(&sha), message);

        let author = commit.author();
        match author.email().and_then(|email| self.authors.get(email)) {
            Some(login) => record.with_author(login.as_str(), self.slug.user_url(login)),
            None => record,
        }
    }
}

impl CommitSource for Git2Repository {
    fn list_commits(&self, base_ref: Option<&str>, head_ref: &str) -> Result<Vec<CommitRecord>> {
        debug!(
            "Retrieving commit diff between {} and {}",
            base_ref.unwrap_or("<root>"),
            head_ref
        );

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(self.resolve_commit(head_ref)?)?;

        if let Some(base) = base_ref {
            revwalk.hide(self.resolve_commit(base)?)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;
            commits.push(self.to_record(&commit));
        }

        Ok(commits)
    }
}

impl ReleaseSource for Git2Repository {
    fn list_releases(&self) -> Result<ReleasePages<'_>> {
        let tags = self.repo.tag_names(None)?;

        let releases: Vec<ReleaseTagSummary> = tags
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, name)| {
                ReleaseTagSummary::new(
                    index as u64 + 1,
                    name,
                    false,
                    PRERELEASE_TAG.is_match(name),
                )
            })
            .collect();

        Ok(ReleasePages::chunked(releases, self.page_size))
    }
}

impl TagSink for Git2Repository {
    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| ReleaseError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| ReleaseError::remote(format!("Cannot find remote: {}", e)))?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                return git2::Cred::ssh_key_from_agent(username);
            }
            git2::Cred::default()
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                warn!("Could not update reference {}: {}", refname, status);
                Err(git2::Error::from_str(&format!("Push failed for {}", refname)))
            }
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| ReleaseError::remote(format!("Push failed: {}", e)))?;

        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo
            .tag_delete(name)
            .map_err(|e| ReleaseError::tag(format!("Cannot delete tag '{}': {}", name, e)))?;
        debug!("Deleted local tag {}", name);
        Ok(())
    }
}
