/// Coordinates of the hosted repository, used to build links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        let host: String = host.into();
        RepoSlug {
            host: host.trim_end_matches('/').to_string(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Repository on github.com
    pub fn github(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new("https://github.com", owner, name)
    }

    pub fn commit_url(&self, sha: &str) -> String {
        format!("{}/{}/{}/commit/{}", self.host, self.owner, self.name, sha)
    }

    pub fn user_url(&self, login: &str) -> String {
        format!("{}/{}", self.host, login)
    }

    pub fn pull_request_url(&self, number: &str) -> String {
        format!("{}/{}/{}/pull/{}", self.host, self.owner, self.name, number)
    }

    /// Jira cloud browse URL of the repository owner
    pub fn default_task_base_url(&self) -> String {
        format!("https://{}.atlassian.net/browse", self.owner)
    }
}
