//! Step outputs in the GitHub Actions `key=value` format

use crate::analyzer::BumpOutcome;
use crate::changelog::ChangelogReport;
use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Delimiter for multi-line values (`key<<DELIM ... DELIM`)
const HEREDOC_DELIMITER: &str = "GIT_RELEASE_EOF";

/// Every output of one release run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOutputs {
    /// Shas of the changelog lines, after squash expansion, in emission order
    pub shas: Vec<String>,
    pub contributors: Vec<String>,
    pub tasks: Vec<String>,
    pub pull_requests: Vec<String>,
    pub change_type: String,
    pub base_tag: String,
    pub previous_tag: String,
    pub previous_version: String,
    pub new_tag: String,
    pub new_version: String,
    pub release_type: String,
    pub release_name: String,
    /// Rendered release body
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl ReleaseOutputs {
    /// Outputs of the changelog pass
    pub fn from_report(report: &ChangelogReport, base_tag: Option<&str>) -> Self {
        ReleaseOutputs {
            shas: report.shas.clone(),
            contributors: report.contributors.clone(),
            tasks: report.tasks.clone(),
            pull_requests: report.pull_requests.clone(),
            change_type: report.bump.to_string(),
            base_tag: base_tag.unwrap_or_default().to_string(),
            ..ReleaseOutputs::default()
        }
    }

    /// Record the version bump
    pub fn set_bump(&mut self, outcome: &BumpOutcome) {
        self.previous_tag = outcome.previous_tag.clone();
        self.previous_version = outcome.previous_version.clone();
        self.new_tag = outcome.new_tag.clone();
        self.new_version = outcome.new_version.clone();
        self.release_type = outcome.release_type.to_string();
    }

    /// Ordered `(key, value)` pairs; list values are compact JSON arrays
    pub fn to_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            ("changes", serde_json::to_string(&self.shas)?),
            ("contributors", serde_json::to_string(&self.contributors)?),
            ("tasks", serde_json::to_string(&self.tasks)?),
            ("pull_requests", serde_json::to_string(&self.pull_requests)?),
            ("change_type", self.change_type.clone()),
            ("base_tag", self.base_tag.clone()),
            ("previous_tag", self.previous_tag.clone()),
            ("previous_version", self.previous_version.clone()),
            ("new_tag", self.new_tag.clone()),
            ("new_version", self.new_version.clone()),
            ("release_type", self.release_type.clone()),
            ("release_name", self.release_name.clone()),
            ("body", self.body.clone()),
            ("draft", self.draft.to_string()),
            ("prerelease", self.prerelease.to_string()),
        ])
    }

    /// Write every output, one entry per key
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (key, value) in self.to_pairs()? {
            if value.contains('\n') {
                writeln!(writer, "{}<<{}", key, HEREDOC_DELIMITER)?;
                writeln!(writer, "{}", value)?;
                writeln!(writer, "{}", HEREDOC_DELIMITER)?;
            } else {
                writeln!(writer, "{}={}", key, value)?;
            }
        }
        Ok(())
    }

    /// Append every output to a file such as `$GITHUB_OUTPUT`
    pub fn append_to_file(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_to(&mut file)
    }
}
