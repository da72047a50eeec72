//! Milestone Endpoints

use super::{ApiClient, ApiResult, Method, TokenStore, Transport};
use crate::models::{Milestone, MilestoneRequest};

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub async fn list_milestones(&self, project_id: u32) -> ApiResult<Vec<Milestone>> {
        self.get_json(format!("/api/milestones/project/{}", project_id)).await
    }

    pub async fn create_milestone(&self, milestone: &MilestoneRequest) -> ApiResult<Milestone> {
        if milestone.end_date < milestone.start_date {
            return Err(super::ApiError::Http {
                status: 400,
                message: "end date is before start date".to_string(),
            });
        }
        self.send_json(Method::POST, "/api/milestones", milestone).await
    }

    pub async fn delete_milestone(&self, milestone_id: u32) -> ApiResult<()> {
        self.delete(format!("/api/milestones/{}", milestone_id)).await
    }
}
