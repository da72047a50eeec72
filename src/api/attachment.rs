//! Attachment Endpoints
//!
//! Uploads are multipart (`file` + `issueId`) and downloads are raw bytes;
//! everything else is JSON.

use super::{ApiClient, ApiResult, FormField, HttpRequest, Method, TokenStore, Transport};
use crate::models::Attachment;

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub async fn list_attachments(&self, issue_id: u32) -> ApiResult<Vec<Attachment>> {
        self.get_json(format!("/api/attachments/issue/{}", issue_id)).await
    }

    pub async fn upload_attachment(
        &self,
        issue_id: u32,
        file_name: &str,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> ApiResult<Attachment> {
        let request = HttpRequest::new(Method::POST, "/api/attachments/upload").multipart(vec![
            FormField::File {
                name: "file".to_string(),
                file_name: file_name.to_string(),
                mime: mime.map(str::to_string),
                bytes,
            },
            FormField::Text {
                name: "issueId".to_string(),
                value: issue_id.to_string(),
            },
        ]);
        self.fetch(request).await
    }

    /// File contents as stored; the caller knows the name and type from the listing
    pub async fn download_attachment(&self, attachment_id: u32) -> ApiResult<Vec<u8>> {
        let response = self
            .execute(HttpRequest::get(format!("/api/attachments/download/{}", attachment_id)))
            .await?;
        Ok(response.body)
    }

    pub async fn delete_attachment(&self, attachment_id: u32) -> ApiResult<()> {
        self.delete(format!("/api/attachments/{}", attachment_id)).await
    }
}
