//! Session Endpoints
//!
//! Login, registration, logout and the current user's profile.

use super::{ApiClient, ApiError, ApiResult, FormField, HttpRequest, Method, TokenStore, Transport};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};

/// Profile edit; only the fields that are set get sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    /// Required by the backend whenever `new_password` is set
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    /// (file name, mime type, bytes)
    pub picture: Option<(String, Option<String>, Vec<u8>)>,
}

impl ProfileUpdate {
    fn into_fields(self) -> Vec<FormField> {
        let text = [
            ("fullName", self.full_name),
            ("currentPassword", self.current_password),
            ("newPassword", self.new_password),
        ];
        let mut fields: Vec<FormField> = text
            .into_iter()
            .filter_map(|(name, value)| {
                value.filter(|v| !v.is_empty()).map(|value| FormField::Text {
                    name: name.to_string(),
                    value,
                })
            })
            .collect();
        if let Some((file_name, mime, bytes)) = self.picture {
            fields.push(FormField::File {
                name: "profilePicture".to_string(),
                file_name,
                mime,
                bytes,
            });
        }
        fields
    }
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// Store a token pair handed out by login or register
    fn open_session(&self, auth: &AuthResponse) -> ApiResult<()> {
        let access = auth
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized(auth.message.clone().unwrap_or_default()))?;
        self.tokens().set_access_token(access)?;
        if let Some(refresh) = auth.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            self.tokens().set_refresh_token(refresh)?;
        }
        log::info!("[AUTH] session opened");
        Ok(())
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthResponse> {
        let request = HttpRequest::new(Method::POST, "/auth/login")
            .json(credentials)?
            .without_refresh();
        let auth: AuthResponse = self.fetch(request).await?;
        self.open_session(&auth)?;
        Ok(auth)
    }

    pub async fn register(&self, user: &RegisterRequest) -> ApiResult<AuthResponse> {
        let request = HttpRequest::new(Method::POST, "/auth/register")
            .json(user)?
            .without_refresh();
        let auth: AuthResponse = self.fetch(request).await?;
        if auth.success == Some(false) {
            return Err(ApiError::Http {
                status: 400,
                message: auth.message.unwrap_or_else(|| "registration rejected".to_string()),
            });
        }
        self.open_session(&auth)?;
        Ok(auth)
    }

    /// Local only: the backend keeps no session state
    pub fn logout(&self) {
        self.tokens().clear();
        log::info!("[AUTH] logged out");
    }

    pub async fn profile(&self) -> ApiResult<User> {
        if !self.has_session() {
            return Err(ApiError::Unauthorized("not authenticated".to_string()));
        }
        self.get_json("/api/users/profile").await
    }

    /// Multipart `PUT /api/users/profile`; returns the updated user
    pub async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<User> {
        let fields = update.into_fields();
        if fields.is_empty() {
            return Err(ApiError::Http {
                status: 400,
                message: "nothing to update".to_string(),
            });
        }
        self.fetch(HttpRequest::new(Method::PUT, "/api/users/profile").multipart(fields)).await
    }
}
