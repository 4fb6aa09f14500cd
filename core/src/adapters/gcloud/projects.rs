//! Project discovery from gcloud configurations.

use crate::domain::ProjectId;
use crate::error::{Error, Result};
use crate::ports::ProjectLister;

use super::exec::Toolchain;
use super::models::GcloudConfiguration;

/// Lists projects from the operator's gcloud configurations.
pub struct GcloudProjectLister {
    tools: Toolchain,
    account_filter: Option<String>,
}

impl GcloudProjectLister {
    pub fn new(tools: Toolchain, account_filter: Option<String>) -> Self {
        Self {
            tools,
            account_filter,
        }
    }
}

impl ProjectLister for GcloudProjectLister {
    async fn list_projects(&self) -> Result<Vec<ProjectId>> {
        let configurations = list_configurations(&self.tools).await?;
        if configurations.is_empty() {
            return Err(Error::Config(
                "no google cloud configurations found".to_string(),
            ));
        }

        let projects = select_projects(&configurations, self.account_filter.as_deref());
        tracing::debug!(
            configurations = configurations.len(),
            projects = projects.len(),
            "listed gcloud projects"
        );
        Ok(projects)
    }
}

/// Fetches every gcloud configuration.
pub(crate) async fn list_configurations(tools: &Toolchain) -> Result<Vec<GcloudConfiguration>> {
    let output = tools
        .gcloud(&["config", "configurations", "list", "--format", "json"])
        .await?;
    Ok(serde_json::from_str(&output)?)
}

/// Projects of configurations whose account matches `account_filter`, deduplicated in order.
pub(crate) fn select_projects(
    configurations: &[GcloudConfiguration],
    account_filter: Option<&str>,
) -> Vec<ProjectId> {
    let mut projects: Vec<ProjectId> = Vec::new();

    for config in configurations {
        if let Some(filter) = account_filter {
            if !config.account().is_some_and(|a| a.contains(filter)) {
                continue;
            }
        }
        if let Some(project) = config.project() {
            if !projects.iter().any(|p| p == project) {
                projects.push(project.to_string());
            }
        }
    }

    projects
}

/// Name of the configuration whose project equals `project`, ignoring case.
pub(crate) fn find_profile<'a>(
    configurations: &'a [GcloudConfiguration],
    project: &str,
) -> Option<&'a str> {
    configurations
        .iter()
        .find(|c| c.project().is_some_and(|p| p.eq_ignore_ascii_case(project)))
        .map(|c| c.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configurations() -> Vec<GcloudConfiguration> {
        serde_json::from_str(
            r#"[
                {"name": "a", "properties": {"core": {"account": "ops@corp.com", "project": "shop-prod"}}},
                {"name": "b", "properties": {"core": {"account": "me@gmail.com", "project": "sandbox"}}},
                {"name": "c", "properties": {"core": {"account": "ci@corp.com", "project": "shop-prod"}}},
                {"name": "d", "properties": {"core": {"account": "ops@corp.com"}}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_projects_dedupes() {
        let projects = select_projects(&configurations(), None);
        assert_eq!(projects, vec!["shop-prod", "sandbox"]);
    }

    #[test]
    fn test_select_projects_account_filter() {
        let projects = select_projects(&configurations(), Some("@corp.com"));
        assert_eq!(projects, vec!["shop-prod"]);

        assert!(select_projects(&configurations(), Some("@nowhere")).is_empty());
    }

    #[test]
    fn test_find_profile() {
        let configs = configurations();
        assert_eq!(find_profile(&configs, "SANDBOX"), Some("b"));
        assert_eq!(find_profile(&configs, "shop-prod"), Some("a"));
        assert_eq!(find_profile(&configs, "unknown"), None);
    }
}
