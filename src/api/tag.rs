//! Tag and Category Endpoints
//!
//! Both are flat, user-owned name lists with identical CRUD shapes.

use serde::Serialize;

use super::{ApiClient, ApiResult, Method, TokenStore, Transport};
use crate::models::{Category, Tag};

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    // ========================
    // Tags
    // ========================

    pub async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        self.get_json("/api/tags").await
    }

    pub async fn create_tag(&self, name: &str) -> ApiResult<Tag> {
        self.send_json(Method::POST, "/api/tags", &NameArgs { name }).await
    }

    pub async fn rename_tag(&self, id: u32, name: &str) -> ApiResult<Tag> {
        self.send_json(Method::PUT, format!("/api/tags/{}", id), &NameArgs { name }).await
    }

    pub async fn delete_tag(&self, id: u32) -> ApiResult<()> {
        self.delete(format!("/api/tags/{}", id)).await
    }

    // ========================
    // Categories
    // ========================

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get_json("/api/categories").await
    }

    pub async fn create_category(&self, name: &str) -> ApiResult<Category> {
        self.send_json(Method::POST, "/api/categories", &NameArgs { name }).await
    }

    pub async fn rename_category(&self, id: u32, name: &str) -> ApiResult<Category> {
        self.send_json(Method::PUT, format!("/api/categories/{}", id), &NameArgs { name }).await
    }

    pub async fn delete_category(&self, id: u32) -> ApiResult<()> {
        self.delete(format!("/api/categories/{}", id)).await
    }
}
