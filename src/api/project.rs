//! Project Endpoints

use serde::Serialize;

use super::{ApiClient, ApiResult, HttpRequest, Method, TokenStore, Transport};
use crate::models::{Chat, MessageResponse, Project, ProjectRequest, ProjectRole, Role};

/// Optional filters for the project list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteArgs<'a> {
    email: &'a str,
    project_id: u32,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub async fn list_projects(&self, filter: &ProjectFilter) -> ApiResult<Vec<Project>> {
        let mut request = HttpRequest::get("/api/projects");
        if let Some(category) = &filter.category {
            request = request.query("category", category);
        }
        if let Some(tag) = &filter.tag {
            request = request.query("tag", tag);
        }
        // Older backends wrap the list as { "projects": [...] }
        let value: serde_json::Value = self.fetch(request).await?;
        let list = match value {
            serde_json::Value::Object(mut map) => map.remove("projects").unwrap_or_default(),
            other => other,
        };
        if list.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(list)?)
    }

    pub async fn get_project(&self, project_id: u32) -> ApiResult<Project> {
        self.get_json(format!("/api/projects/{}", project_id)).await
    }

    pub async fn search_projects(&self, keyword: &str) -> ApiResult<Vec<Project>> {
        self.fetch(HttpRequest::get("/api/projects/search").query("keyword", keyword)).await
    }

    pub async fn create_project(&self, project: &ProjectRequest) -> ApiResult<Project> {
        self.send_json(Method::POST, "/api/projects", project).await
    }

    pub async fn update_project(&self, project_id: u32, project: &ProjectRequest) -> ApiResult<Project> {
        self.send_json(Method::PATCH, format!("/api/projects/{}", project_id), project).await
    }

    pub async fn delete_project(&self, project_id: u32) -> ApiResult<()> {
        self.delete(format!("/api/projects/{}", project_id)).await
    }

    pub async fn invite_to_project(&self, project_id: u32, email: &str) -> ApiResult<MessageResponse> {
        self.send_json(Method::POST, "/api/projects/invite", &InviteArgs { email, project_id }).await
    }

    pub async fn accept_invitation(&self, token: &str) -> ApiResult<serde_json::Value> {
        self.fetch(HttpRequest::get("/api/projects/accept_invitation").query("token", token)).await
    }

    pub async fn assign_role(&self, project_id: u32, user_id: u32, role: Role) -> ApiResult<serde_json::Value> {
        let role = serde_json::to_value(role)?;
        let role = role.as_str().unwrap_or_default().to_string();
        let request = HttpRequest::new(Method::POST, format!("/api/projects/{}/roles", project_id))
            .query("userId", user_id)
            .query("role", role);
        self.fetch(request).await
    }

    /// Roles come embedded in the project document
    pub async fn project_roles(&self, project_id: u32) -> ApiResult<Vec<ProjectRole>> {
        Ok(self.get_project(project_id).await?.roles)
    }

    pub async fn project_chat(&self, project_id: u32) -> ApiResult<Chat> {
        self.get_json(format!("/api/projects/{}/chat", project_id)).await
    }
}
