//! Issue Endpoints

use super::{ApiClient, ApiResult, Method, TokenStore, Transport};
use crate::models::{Issue, IssueRequest, IssueStatus};

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub async fn list_issues(&self, project_id: u32) -> ApiResult<Vec<Issue>> {
        self.get_json(format!("/api/issues/project/{}", project_id)).await
    }

    pub async fn get_issue(&self, issue_id: u32) -> ApiResult<Issue> {
        self.get_json(format!("/api/issues/{}", issue_id)).await
    }

    pub async fn create_issue(&self, issue: &IssueRequest) -> ApiResult<Issue> {
        self.send_json(Method::POST, "/api/issues", issue).await
    }

    pub async fn update_issue(&self, issue_id: u32, issue: &IssueRequest) -> ApiResult<Issue> {
        self.send_json(Method::PUT, format!("/api/issues/{}", issue_id), issue).await
    }

    /// Board drops land here: `PUT /api/issues/{id}/status/{STATUS}`
    pub async fn update_issue_status(&self, issue_id: u32, status: IssueStatus) -> ApiResult<Issue> {
        let path = format!("/api/issues/{}/status/{}", issue_id, status.as_str());
        self.fetch(super::HttpRequest::new(Method::PUT, path)).await
    }

    pub async fn assign_issue(&self, issue_id: u32, user_id: u32) -> ApiResult<Issue> {
        let path = format!("/api/issues/{}/assignee/{}", issue_id, user_id);
        self.fetch(super::HttpRequest::new(Method::PUT, path)).await
    }

    pub async fn delete_issue(&self, issue_id: u32) -> ApiResult<()> {
        self.delete(format!("/api/issues/{}", issue_id)).await
    }
}
