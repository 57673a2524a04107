use crate::domain::{CommitRecord, ReleaseTagSummary};
use crate::error::{ReleaseError, Result};
use crate::source::{CommitSource, ReleasePage, ReleasePages, ReleaseSource, TagSink};
use std::cell::{Cell, RefCell};

/// Mock repository for testing without actual git or hosting operations
#[derive(Default)]
pub struct MockRepository {
    commits: Vec<CommitRecord>,
    release_pages: Vec<ReleasePage>,
    listings: Cell<usize>,
    requested_ranges: RefCell<Vec<(Option<String>, String)>>,
    created_tags: RefCell<Vec<String>>,
    pushed_tags: RefCell<Vec<(String, String)>>,
    push_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit returned by every commit listing
    pub fn add_commit(&mut self, commit: CommitRecord) {
        self.commits.push(commit);
    }

    /// Append a page to the release listing
    pub fn add_release_page(&mut self, page: Vec<ReleaseTagSummary>) {
        self.release_pages.push(page);
    }

    /// How many times the release listing was started
    pub fn release_listings(&self) -> usize {
        self.listings.get()
    }

    /// `(base, head)` of every commit listing, in call order
    pub fn requested_ranges(&self) -> Vec<(Option<String>, String)> {
        self.requested_ranges.borrow().clone()
    }

    pub fn created_tags(&self) -> Vec<String> {
        self.created_tags.borrow().clone()
    }

    /// `(tag, remote)` of every push
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed_tags.borrow().clone()
    }

    /// Make every push fail with a remote error
    pub fn fail_pushes(&mut self, message: impl Into<String>) {
        self.push_error = Some(message.into());
    }
}

impl CommitSource for MockRepository {
    fn list_commits(&self, base_ref: Option<&str>, head_ref: &str) -> Result<Vec<CommitRecord>> {
        self.requested_ranges
            .borrow_mut()
            .push((base_ref.map(str::to_string), head_ref.to_string()));
        Ok(self.commits.clone())
    }
}

impl ReleaseSource for MockRepository {
    fn list_releases(&self) -> Result<ReleasePages<'_>> {
        self.listings.set(self.listings.get() + 1);
        Ok(ReleasePages::from_pages(self.release_pages.clone()))
    }
}

impl TagSink for MockRepository {
    fn create_tag(&self, name: &str) -> Result<()> {
        let mut tags = self.created_tags.borrow_mut();
        if tags.iter().any(|tag| tag == name) {
            return Err(ReleaseError::tag(format!("Tag already exists: {}", name)));
        }
        tags.push(name.to_string());
        Ok(())
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        if let Some(message) = &self.push_error {
            return Err(ReleaseError::remote(message.clone()));
        }
        self.pushed_tags
            .borrow_mut()
            .push((name.to_string(), remote.to_string()));
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        let mut tags = self.created_tags.borrow_mut();
        let before = tags.len();
        tags.retain(|tag| tag != name);
        if tags.len() == before {
            return Err(ReleaseError::tag(format!("Tag not found: {}", name)));
        }
        Ok(())
    }
}
