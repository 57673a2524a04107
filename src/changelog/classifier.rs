use crate::domain::{Category, CommitRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// A squash commit lists the squashed commits as `* ` bullets
static SQUASH_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\* .*\n").expect("Invalid regex"));

/// Commits assigned to one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: Category,
    pub commits: Vec<CommitRecord>,
}

impl CategoryGroup {
    fn new(category: Category) -> Self {
        CategoryGroup {
            category,
            commits: Vec::new(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.category.key()
    }

    pub fn title(&self) -> &'static str {
        self.category.title()
    }
}

/// Result of one classification pass: a partition into category groups plus
/// the uncategorized remainder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// One group per category, in [`Category::ALL`] order
    groups: Vec<CategoryGroup>,
    uncategorized: Vec<CommitRecord>,
}

impl Classification {
    fn empty() -> Self {
        Classification {
            groups: Category::ALL.into_iter().map(CategoryGroup::new).collect(),
            uncategorized: Vec::new(),
        }
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn group(&self, category: Category) -> &CategoryGroup {
        &self.groups[category as usize]
    }

    /// Groups holding at least one commit, in declared order
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter().filter(|group| !group.commits.is_empty())
    }

    pub fn uncategorized(&self) -> &[CommitRecord] {
        &self.uncategorized
    }

    /// Retained commits in changelog order: uncategorized first, then each group
    pub fn emission_order(&self) -> impl Iterator<Item = &CommitRecord> {
        self.uncategorized
            .iter()
            .chain(self.groups.iter().flat_map(|group| group.commits.iter()))
    }

    pub fn len(&self) -> usize {
        self.emission_order().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions commits into conventional-commit categories
pub struct CommitClassifier {
    scope: Option<String>,
}

impl CommitClassifier {
    /// Create a classifier; with a scope, only `(scope):` messages are kept
    pub fn new(scope: Option<String>) -> Self {
        CommitClassifier {
            scope: scope.filter(|s| !s.is_empty()),
        }
    }

    /// Classify commits, expanding squash commits into one entry per bullet
    pub fn classify(&self, commits: &[CommitRecord]) -> Classification {
        let mut classification = Classification::empty();

        for commit in commits {
            for fragment in expand_squash(commit) {
                self.categorize(fragment, &mut classification);
            }
        }

        classification
    }

    fn categorize(&self, commit: CommitRecord, classification: &mut Classification) {
        if commit.message.is_empty() {
            debug!("Commit {} has no message", commit.short_sha());
            return;
        }

        if let Some(scope) = &self.scope {
            if !commit.message.contains(&format!("({}):", scope)) {
                debug!(
                    "Commit has no scope when it is required -> \"{}\"",
                    commit.message
                );
                return;
            }
        }

        match Category::classify(&commit.message) {
            Some(category) => {
                debug!(
                    "Commit matches category {} -> \"{}\"",
                    category.key(),
                    commit.message
                );
                classification.groups[category as usize].commits.push(commit);
            }
            None => {
                debug!("Commit has no category -> \"{}\"", commit.message);
                classification.uncategorized.push(commit);
            }
        }
    }
}

/// Split a squash commit on its `* ` delimiters.
///
/// Every fragment, the leading title included, keeps the original sha, URL and
/// author. Messages are trimmed; a non-squash commit yields itself.
pub fn expand_squash(commit: &CommitRecord) -> Vec<CommitRecord> {
    if !SQUASH_BULLET.is_match(&commit.message) {
        return vec![commit.with_message(commit.message.trim())];
    }

    debug!("Commit {} is a squash, analyzing content", commit.short_sha());
    commit
        .message
        .split("* ")
        .map(|fragment| commit.with_message(fragment.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> CommitRecord {
        CommitRecord::new("62ec8ea713fdf14e4abaef3d7d5138194dec49ce", "https://commiturl", message)
            .with_author("darioblanco", "https://authorurl")
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
    fn test_one_commit_per_category() {
        let messages = [
            "feat:super feature",
            "fix: My fix",
            "perf: set additional performance steps",
            "docs(my-app): document everything",
            "style: awesome style",
            "refactor(my-app): one does not simply refactor",
            "test: Tests are good",
            "chore: somebody has to keep things going",
            "build: like chore but fancier",
            "ci: ok this is a CI change",
            "uncategorized commit",
        ];
        let commits: Vec<_> = messages.iter().map(|m| commit(m)).collect();

        let classification = CommitClassifier::new(None).classify(&commits);

        for group in classification.groups() {
            assert_eq!(group.commits.len(), 1, "group {}", group.key());
        }
        assert_eq!(classification.uncategorized().len(), 1);
        assert_eq!(classification.len(), 11);
    }

    #[test]
    fn test_scope_gate() {
        let commits = vec![
            commit("docs(my-app): document everything"),
            commit("fix: My fix"),
            commit("refactor(my-app): one does not simply refactor"),
            commit("feat(other-app): not ours"),
        ];

        let classification = CommitClassifier::new(Some("my-app".to_string())).classify(&commits);

        assert_eq!(classification.len(), 2);
        assert_eq!(classification.group(Category::Docs).commits.len(), 1);
        assert_eq!(classification.group(Category::Refactor).commits.len(), 1);
    }

    #[test]
    fn test_empty_scope_is_no_gate() {
        let classification =
            CommitClassifier::new(Some(String::new())).classify(&[commit("fix: a")]);
        assert_eq!(classification.len(), 1);
    }

    #[test]
    fn test_empty_messages_dropped() {
        let classification =
            CommitClassifier::new(None).classify(&[commit(""), commit("   \n  ")]);
        assert!(classification.is_empty());
    }

    #[test]
    fn test_squash_expansion_with_scope() {
        let classification =
            CommitClassifier::new(Some("auth".to_string())).classify(&[commit(SQUASH)]);

        // "Address comment from PR" has no scope and is dropped
        assert_eq!(classification.len(), 8);
        assert_eq!(classification.group(Category::Feat).commits.len(), 3);
        assert_eq!(classification.group(Category::Fix).commits.len(), 2);
        assert_eq!(classification.group(Category::Test).commits.len(), 1);
        assert_eq!(classification.group(Category::Perf).commits.len(), 1);
        assert_eq!(
            classification.uncategorized()[0].message,
            "(auth): Set values for staging and production"
        );
        assert!(classification
            .emission_order()
            .all(|c| c.sha == "62ec8ea713fdf14e4abaef3d7d5138194dec49ce"));
    }

    #[test]
    fn test_squash_expansion_without_scope() {
        let message = "Title of my PR\n\n\
            * set login endpoint controller\n\n\
            * add integration test for login endpoint\n\n";
        let classification = CommitClassifier::new(None).classify(&[commit(message)]);

        assert_eq!(classification.uncategorized().len(), 3);
        assert_eq!(classification.uncategorized()[0].message, "Title of my PR");
        assert_eq!(classification.non_empty_groups().count(), 0);
    }

    #[test]
    fn test_squash_fragment_keeps_body() {
        let fragments = expand_squash(&commit(SQUASH));
        let perf = fragments
            .iter()
            .find(|f| f.message.starts_with("perf"))
            .unwrap();
        assert!(perf.message.ends_with("And this is the footer"));
        assert_eq!(fragments.len(), 9);
    }

    #[test]
    fn test_bullet_without_newline_is_not_squash() {
        let fragments = expand_squash(&commit("fix: handle * bullets"));
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].message, "fix: handle * bullets");
    }

    #[test]
    fn test_first_match_wins_and_partition() {
        let commits = vec![commit("fix(feat): naming"), commit("feat(fix): naming")];
        let classification = CommitClassifier::new(None).classify(&commits);

        assert_eq!(classification.group(Category::Fix).commits[0].message, "fix(feat): naming");
        assert_eq!(classification.group(Category::Feat).commits[0].message, "feat(fix): naming");
        assert_eq!(classification.len(), commits.len());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let commits = vec![commit(SQUASH), commit("chore: deps"), commit("misc")];
        let classifier = CommitClassifier::new(Some("auth".to_string()));
        assert_eq!(classifier.classify(&commits), classifier.classify(&commits));
    }
}
