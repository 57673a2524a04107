/// Resolved identity of a commit author on the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAuthor {
    pub login: String,
    pub url: String,
}

/// A commit as fetched from the source, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub commit_url: String,
    /// Raw message, possibly multi-line
    pub message: String,
    /// Absent when the contributor could not be resolved
    pub author: Option<CommitAuthor>,
}

impl CommitRecord {
    pub fn new(
        sha: impl Into<String>,
        commit_url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CommitRecord {
            sha: sha.into(),
            commit_url: commit_url.into(),
            message: message.into(),
            author: None,
        }
    }

    pub fn with_author(mut self, login: impl Into<String>, url: impl Into<String>) -> Self {
        self.author = Some(CommitAuthor {
            login: login.into(),
            url: url.into(),
        });
        self
    }

    /// Same commit identity carrying a different message (squash fragments)
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        CommitRecord {
            message: message.into(),
            ..self.clone()
        }
    }

    /// First 8 characters of the sha
    pub fn short_sha(&self) -> &str {
        self.sha.get(..8).unwrap_or(&self.sha)
    }

    /// First line of the message
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn author_login(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.login.as_str())
    }
}
