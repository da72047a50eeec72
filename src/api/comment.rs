//! Comment Endpoints

use super::{ApiClient, ApiResult, Method, TokenStore, Transport};
use crate::models::{Comment, CommentRequest};

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub async fn list_comments(&self, issue_id: u32) -> ApiResult<Vec<Comment>> {
        self.get_json(format!("/api/comments/{}", issue_id)).await
    }

    pub async fn create_comment(&self, comment: &CommentRequest) -> ApiResult<Comment> {
        self.send_json(Method::POST, "/api/comments", comment).await
    }

    pub async fn delete_comment(&self, comment_id: u32) -> ApiResult<()> {
        self.delete(format!("/api/comments/{}", comment_id)).await
    }
}
