use crate::changelog::classifier::Classification;
use crate::changelog::references::{ExtractedReferences, ReferenceExtractor};
use crate::domain::{BumpType, Category, RepoSlug};
use serde::Serialize;

/// Everything one rendering pass produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogReport {
    /// Markdown changelog, trimmed
    pub changes: String,
    /// Sha of every emitted line, in emission order
    pub shas: Vec<String>,
    pub bump: BumpType,
    pub pull_requests: Vec<String>,
    pub tasks: Vec<String>,
    /// `[ID](base/ID)` links joined with ", "
    pub task_links: String,
    /// `[#N](.../pull/N)` links joined with ", "
    pub pull_request_links: String,
    pub contributors: Vec<String>,
}

impl ChangelogReport {
    pub fn is_empty(&self) -> bool {
        self.shas.is_empty()
    }
}

/// Assembles the changelog text and the aggregated bump signal
pub struct ChangelogRenderer<'a> {
    extractor: ReferenceExtractor,
    slug: &'a RepoSlug,
}

impl<'a> ChangelogRenderer<'a> {
    pub fn new(extractor: ReferenceExtractor, slug: &'a RepoSlug) -> Self {
        ChangelogRenderer { extractor, slug }
    }

    /// Render a classification: headerless uncategorized lines first, then a
    /// titled section for each non-empty category in declared order
    pub fn render(&self, classification: &Classification) -> ChangelogReport {
        let mut refs = ExtractedReferences::default();
        let mut shas = Vec::new();
        let mut changes = String::new();

        for commit in classification.uncategorized() {
            changes.push_str(&self.extractor.extract(commit, &mut refs));
            changes.push('\n');
            shas.push(commit.sha.clone());
        }

        for group in classification.non_empty_groups() {
            changes.push('\n');
            changes.push_str(group.title());
            changes.push('\n');
            for commit in &group.commits {
                changes.push_str(&self.extractor.extract(commit, &mut refs));
                changes.push('\n');
                shas.push(commit.sha.clone());
            }
        }

        let has_features = !classification.group(Category::Feat).commits.is_empty();
        let bump = match refs.signal {
            BumpType::Patch if has_features => BumpType::Minor,
            signal => signal,
        };

        let task_links = refs
            .tasks
            .iter()
            .map(|task| self.extractor.task_link(task))
            .collect::<Vec<_>>()
            .join(", ");
        let pull_request_links = refs
            .pull_requests
            .iter()
            .map(|number| format!("[#{}]({})", number, self.slug.pull_request_url(number)))
            .collect::<Vec<_>>()
            .join(", ");

        ChangelogReport {
            changes: changes.trim().to_string(),
            shas,
            bump,
            pull_requests: refs.pull_requests,
            tasks: refs.tasks,
            task_links,
            pull_request_links,
            contributors: refs.contributors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::classifier::CommitClassifier;
    use crate::domain::CommitRecord;

    fn commit(message: &str) -> CommitRecord {
        CommitRecord::new("62ec8ea713fdf14e4abaef3d7d5138194dec49ce", "https://commiturl", message)
            .with_author("darioblanco", "https://authorurl")
    }

    fn render(messages: &[&str], scope: Option<&str>) -> ChangelogReport {
        let slug = RepoSlug::github("theowner", "therepo");
        let extractor = ReferenceExtractor::new("JIRA-", "base").unwrap();
        let commits: Vec<_> = messages.iter().map(|m| commit(m)).collect();
        let classification = CommitClassifier::new(scope.map(str::to_string)).classify(&commits);
        ChangelogRenderer::new(extractor, &slug).render(&classification)
    }

    const LINK: &str = "[62ec8ea7](https://commiturl) ([@darioblanco](https://authorurl))";

    #[test]
    fn test_layout_uncategorized_first_then_sections() {
        let report = render(&["fix: My fix", "misc change", "feat: thing"], None);

        let expected = format!(
            "- Misc change - {link}\n\n\
             ### **:zap: Features**\n- Thing - {link}\n\n\
             ### **:wrench: Fixes**\n- My fix - {link}",
            link = LINK
        );
        assert_eq!(report.changes, expected);
        assert_eq!(report.shas.len(), 3);
    }

    #[test]
    fn test_sections_only_are_trimmed() {
        let report = render(&["docs: readme"], None);
        assert!(report.changes.starts_with("### **:books: Documentation**\n"));
    }

    #[test]
    fn test_features_escalate_patch_to_minor() {
        assert_eq!(render(&["fix: a"], None).bump, BumpType::Patch);
        assert_eq!(render(&["fix: a", "feat: b"], None).bump, BumpType::Minor);
    }

    #[test]
    fn test_major_is_never_downgraded() {
        let report = render(&["feat: a", "fix: b #MAJOR"], None);
        assert_eq!(report.bump, BumpType::Major);
    }

    #[test]
    fn test_empty_classification() {
        let report = render(&[], None);
        assert!(report.is_empty());
        assert_eq!(report.changes, "");
        assert_eq!(report.bump, BumpType::Patch);
        assert_eq!(report.task_links, "");
        assert_eq!(report.pull_request_links, "");
    }

    #[test]
    fn test_links_joined() {
        let report = render(
            &["fix: a [JIRA-1] (#10)", "feat: b [JIRA-2] (#11)", "chore: c (#10)"],
            None,
        );
        assert_eq!(report.tasks, vec!["JIRA-2", "JIRA-1"]);
        assert_eq!(report.task_links, "[JIRA-2](base/JIRA-2), [JIRA-1](base/JIRA-1)");
        assert_eq!(report.pull_requests, vec!["11", "10", "10"]);
        assert_eq!(
            report.pull_request_links,
            "[#11](https://github.com/theowner/therepo/pull/11), \
             [#10](https://github.com/theowner/therepo/pull/10), \
             [#10](https://github.com/theowner/therepo/pull/10)"
        );
    }

    #[test]
    fn test_contributors_only_from_retained_commits() {
        let slug = RepoSlug::github("theowner", "therepo");
        let extractor = ReferenceExtractor::new("JIRA-", "base").unwrap();
        let commits = vec![
            commit("fix(app): kept"),
            CommitRecord::new("abcdef0123", "https://commiturl", "fix: dropped")
                .with_author("someone", "https://someone"),
        ];
        let classification = CommitClassifier::new(Some("app".to_string())).classify(&commits);
        let report = ChangelogRenderer::new(extractor, &slug).render(&classification);

        assert_eq!(report.contributors, vec!["@darioblanco"]);
    }
}
