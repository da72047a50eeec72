//! Frontend Models
//!
//! Data structures matching the REST backend's JSON (camelCase on the wire).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Issue workflow status; one board per value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    AFazer,
    EmProgresso,
    Concluido,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [IssueStatus::AFazer, IssueStatus::EmProgresso, IssueStatus::Concluido];

    /// Backend enum string
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::AFazer => "A_FAZER",
            IssueStatus::EmProgresso => "EM_PROGRESSO",
            IssueStatus::Concluido => "CONCLUIDO",
        }
    }

    /// Board heading
    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::AFazer => "A Fazer",
            IssueStatus::EmProgresso => "Em Progresso",
            IssueStatus::Concluido => "Concluído",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A_FAZER" => Ok(IssueStatus::AFazer),
            "EM_PROGRESSO" => Ok(IssueStatus::EmProgresso),
            "CONCLUIDO" => Ok(IssueStatus::Concluido),
            other => Err(format!("unknown issue status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssuePriority {
    Baixa,
    Media,
    Alta,
}

impl IssuePriority {
    pub fn label(&self) -> &'static str {
        match self {
            IssuePriority::Baixa => "Baixa",
            IssuePriority::Media => "Média",
            IssuePriority::Alta => "Alta",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Bug,
    Feature,
    Task,
    Improvement,
    Research,
    Spike,
}

impl IssueType {
    pub fn label(&self) -> &'static str {
        match self {
            IssueType::Bug => "Bug",
            IssueType::Feature => "Feature",
            IssueType::Task => "Tarefa",
            IssueType::Improvement => "Melhoria",
            IssueType::Research => "Pesquisa",
            IssueType::Spike => "Spike",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneStatus {
    Planejado,
    EmAndamento,
    Concluido,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Reference to a milestone embedded in an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRef {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

/// Issue (a task card on the board)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: IssuePriority,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub status: IssueStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub milestone: Option<MilestoneRef>,
    #[serde(default, alias = "projectID")]
    pub project_id: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Create/full-update payload for an issue
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub project_id: u32,
    pub priority: IssuePriority,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub due_date: Option<NaiveDateTime>,
    pub milestone_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Administrator,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRole {
    pub id: u32,
    #[serde(default)]
    pub user: Option<User>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub team: Vec<User>,
    #[serde(default)]
    pub roles: Vec<ProjectRole>,
}

/// Create/patch payload for a project
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: MilestoneStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: MilestoneStatus,
    pub project_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: u32,
    pub file_name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub upload_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub issue_id: u32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u32,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub sender: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    pub sender_id: u32,
    pub project_id: u32,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Token pair returned by login, register and refresh
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Only present on register
    #[serde(default)]
    pub success: Option<bool>,
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_from_backend_json() {
        let json = r#"{
            "id": 5,
            "title": "Fix login",
            "description": null,
            "status": "A_FAZER",
            "projectID": 2,
            "priority": "ALTA",
            "type": "BUG",
            "dueDate": "2024-05-01T10:30:00",
            "tags": ["auth"]
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 5);
        assert_eq!(issue.status, IssueStatus::AFazer);
        assert_eq!(issue.priority, IssuePriority::Alta);
        assert_eq!(issue.issue_type, IssueType::Bug);
        assert_eq!(issue.project_id, Some(2));
        assert_eq!(issue.tags, vec!["auth".to_string()]);
        assert!(issue.due_date.is_some());
        assert!(issue.milestone.is_none());
    }

    #[test]
    fn test_status_strings() {
        for status in IssueStatus::ALL {
            assert_eq!(status.as_str().parse::<IssueStatus>().unwrap(), status);
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{}\"", status.as_str()));
        }
        assert!("DONE".parse::<IssueStatus>().is_err());
    }

    #[test]
    fn test_issue_request_wire_names() {
        let req = IssueRequest {
            title: "t".to_string(),
            description: None,
            status: IssueStatus::AFazer,
            project_id: 1,
            priority: IssuePriority::Baixa,
            issue_type: IssueType::Task,
            due_date: None,
            milestone_id: Some(3),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["projectId"], 1);
        assert_eq!(value["type"], "TASK");
        assert_eq!(value["milestoneId"], 3);
    }
}
