//! Collaborator abstraction layer
//!
//! The release engine never talks to a hosting service or a repository
//! directly. It reaches its collaborators through the traits in this module:
//!
//! - [CommitSource]: the commits between two references
//! - [ReleaseSource]: the paginated release listing
//! - [TagSink]: creation and publication of tag objects
//!
//! Implementations:
//!
//! - [repository::Git2Repository]: a local repository through the `git2` crate
//! - [json::JsonReleaseFile]: a release listing exported from the hosting API
//! - [mock::MockRepository]: in-memory implementation for testing
//! - [WithReleases]: pairs a repository with a separate release listing
//!
//! ```rust
//! # use git_release::source::{CommitSource, ReleaseSource};
//! # fn example<S: CommitSource + ReleaseSource>(repo: &S) -> git_release::Result<()> {
//! let commits = repo.list_commits(Some("v1.0.0"), "HEAD")?;
//! for page in repo.list_releases()? {
//!     for release in page? {
//!         println!("{} ({} commits since v1.0.0)", release.tag_name, commits.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod json;
pub mod mock;
pub mod repository;

pub use json::JsonReleaseFile;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{CommitRecord, ReleaseTagSummary};
use crate::error::Result;

/// Default number of releases per page, matching the GitHub API default
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// One batch of a release listing
pub type ReleasePage = Vec<ReleaseTagSummary>;

/// Finite, forward-only stream of release pages.
///
/// Pages carry no ordering guarantee. Consumers that look for a maximum must
/// drain the stream; the only way to restart it is to list releases again.
pub struct ReleasePages<'a> {
    pages: Box<dyn Iterator<Item = Result<ReleasePage>> + 'a>,
}

impl<'a> ReleasePages<'a> {
    /// Wrap a lazy page iterator
    pub fn new(pages: impl Iterator<Item = Result<ReleasePage>> + 'a) -> Self {
        ReleasePages {
            pages: Box::new(pages),
        }
    }

    /// Stream over pages that are already in memory
    pub fn from_pages(pages: Vec<ReleasePage>) -> Self {
        Self::new(pages.into_iter().map(Ok))
    }

    /// Split a flat listing into pages of `page_size` (at least one per page)
    pub fn chunked(releases: Vec<ReleaseTagSummary>, page_size: usize) -> Self {
        let pages: Vec<ReleasePage> = releases
            .chunks(page_size.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        Self::from_pages(pages)
    }
}

impl Iterator for ReleasePages<'_> {
    type Item = Result<ReleasePage>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pages.next()
    }
}

/// Source of the commits that make up a release
pub trait CommitSource {
    /// Commits reachable from `head_ref` but not from `base_ref`, oldest first.
    ///
    /// # Arguments
    /// * `base_ref` - Last released reference, `None` for the whole history
    /// * `head_ref` - Reference being released (e.g. "HEAD", a sha)
    fn list_commits(&self, base_ref: Option<&str>, head_ref: &str) -> Result<Vec<CommitRecord>>;
}

/// Source of the release listing
pub trait ReleaseSource {
    /// Start a fresh pass over every release, page by page
    fn list_releases(&self) -> Result<ReleasePages<'_>>;
}

/// Destination for new tag objects
pub trait TagSink {
    /// Create a lightweight tag pointing at the released commit
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Publish an existing tag to a remote
    fn push_tag(&self, name: &str, remote: &str) -> Result<()>;

    /// Remove a local tag, e.g. one whose push failed
    fn delete_tag(&self, name: &str) -> Result<()>;
}

/// A repository whose release listing comes from somewhere else, e.g. a
/// [JsonReleaseFile] exported from the hosting service
pub struct WithReleases<R, L> {
    repo: R,
    releases: L,
}

impl<R, L> WithReleases<R, L> {
    pub fn new(repo: R, releases: L) -> Self {
        WithReleases { repo, releases }
    }
}

impl<R: CommitSource, L> CommitSource for WithReleases<R, L> {
    fn list_commits(&self, base_ref: Option<&str>, head_ref: &str) -> Result<Vec<CommitRecord>> {
        self.repo.list_commits(base_ref, head_ref)
    }
}

impl<R, L: ReleaseSource> ReleaseSource for WithReleases<R, L> {
    fn list_releases(&self) -> Result<ReleasePages<'_>> {
        self.releases.list_releases()
    }
}

impl<R: TagSink, L> TagSink for WithReleases<R, L> {
    fn create_tag(&self, name: &str) -> Result<()> {
        self.repo.create_tag(name)
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        self.repo.push_tag(name, remote)
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo.delete_tag(name)
    }
}
