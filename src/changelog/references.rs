use crate::domain::{BumpType, CommitRecord};
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Pull request marker appended by squash merges, e.g. "(#1716)"
static PULL_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#(\d+)\)").expect("Invalid regex"));

/// Explicit major bump request at the end of any line
static MAJOR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)#MAJOR$").expect("Invalid regex"));

/// `type(scope):`, `type:` or `(scope):` somewhere in the title
static CONVENTIONAL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+\([a-zA-Z_-]+\)|[A-Za-z0-9_]+|\([a-zA-Z_-]+\)):")
        .expect("Invalid regex")
});

/// References accumulated over one rendering pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedReferences {
    /// PR numbers in encounter order, duplicates kept
    pub pull_requests: Vec<String>,
    /// Task IDs, first occurrence order
    pub tasks: Vec<String>,
    /// `@login` handles, first occurrence order
    pub contributors: Vec<String>,
    /// Bump signal; only ever raised to major here
    pub signal: BumpType,
}

impl ExtractedReferences {
    fn add_task(&mut self, task: String) {
        if !self.tasks.contains(&task) {
            self.tasks.push(task);
        }
    }

    fn add_contributor(&mut self, handle: String) {
        if !self.contributors.contains(&handle) {
            self.contributors.push(handle);
        }
    }
}

/// Extracts task, PR and bump markers from commits and formats changelog lines
pub struct ReferenceExtractor {
    task_pattern: Regex,
    task_base_url: String,
}

impl ReferenceExtractor {
    /// # Arguments
    /// * `task_prefix` - Task key prefix, e.g. "JIR-" (matched literally)
    /// * `task_base_url` - Base URL task IDs are appended to
    pub fn new(task_prefix: &str, task_base_url: impl Into<String>) -> Result<Self> {
        let pattern = format!(r"(?i)\[{}\d+\]", regex::escape(task_prefix));
        let task_pattern = Regex::new(&pattern).map_err(|e| {
            ReleaseError::config(format!("Invalid task prefix '{}': {}", task_prefix, e))
        })?;

        Ok(ReferenceExtractor {
            task_pattern,
            task_base_url: task_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Markdown link to a task
    pub fn task_link(&self, task: &str) -> String {
        format!("[{}]({}/{})", task, self.task_base_url, task)
    }

    /// Record the commit's references and return its changelog line
    pub fn extract(&self, commit: &CommitRecord, refs: &mut ExtractedReferences) -> String {
        for captures in PULL_REQUEST.captures_iter(&commit.message) {
            debug!("Found PR: {}", &captures[0]);
            refs.pull_requests.push(captures[1].to_string());
        }

        if MAJOR_MARKER.is_match(&commit.message) {
            debug!("MAJOR bump detected in {}", commit.short_sha());
            refs.signal = BumpType::Major;
        }

        let message = self.display_message(commit.title(), refs);

        let (login, author_url) = match &commit.author {
            Some(author) => {
                refs.add_contributor(format!("@{}", author.login));
                (author.login.as_str(), author.url.as_str())
            }
            None => ("", ""),
        };

        format!(
            "- {} - [{}]({}) ([@{}]({}))",
            message,
            commit.short_sha(),
            commit.commit_url,
            login,
            author_url
        )
    }

    fn display_message(&self, title: &str, refs: &mut ExtractedReferences) -> String {
        let description = if CONVENTIONAL_HEADER.is_match(title) {
            title.split_once(':').map_or(title, |(_, rest)| rest.trim())
        } else {
            title
        };

        let mut message = capitalize(description);

        if let Some(found) = self.task_pattern.find(&message) {
            let range = found.range();
            let task = found.as_str()[1..found.len() - 1].to_string();
            debug!("Found task: {}", found.as_str());
            message.replace_range(range, &self.task_link(&task));
            refs.add_task(task);
        }

        message
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
