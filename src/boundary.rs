use std::fmt;

/// Non-fatal conditions at the edges of the release history.
/// These are reported to the user but never stop a release.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits between the base tag and the head reference
    NoNewCommits { base_tag: String, head: String },
    /// Nothing has been released under the prefix yet
    NoReleasedVersion { prefix: String },
    /// Commits exist but none of them made it into the changelog
    EmptyChangelog { commits: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { base_tag, head } => {
                write!(f, "No new commits between '{}' and '{}'", base_tag, head)
            }
            BoundaryWarning::NoReleasedVersion { prefix } if prefix.is_empty() => {
                write!(f, "No released version found, starting from 0.0.0")
            }
            BoundaryWarning::NoReleasedVersion { prefix } => {
                write!(
                    f,
                    "No released version found for prefix '{}', starting from {}0.0.0",
                    prefix, prefix
                )
            }
            BoundaryWarning::EmptyChangelog { commits } => {
                write!(
                    f,
                    "{} commits found but none matched the changelog filters",
                    commits
                )
            }
        }
    }
}
