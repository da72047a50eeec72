//! Session tokens: structural validation and persistence.

use std::sync::Mutex;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use super::error::{ApiError, ApiResult};
use crate::config::AppConfig;

/// Lenient standard-alphabet decoder for the normalized segments
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Structural JWT check: three dot-separated base64url segments.
///
/// Does not look at the signature or the expiry claim.
pub fn is_valid_jwt(token: &str) -> bool {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return false;
    }
    parts.iter().all(|part| segment_decodes(part))
}

fn segment_decodes(part: &str) -> bool {
    let mut normalized: String = part
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }
    SEGMENT_ENGINE.decode(normalized.as_bytes()).is_ok()
}

/// Bearer token ready for the `Authorization` header, if one is stored and valid
pub fn usable_token(raw: Option<String>) -> Option<String> {
    raw.filter(|t| is_valid_jwt(t)).map(|t| t.trim().to_string())
}

/// Durable storage for the token pair
pub trait TokenStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn set_access_token(&self, token: &str) -> ApiResult<()>;
    fn set_refresh_token(&self, token: &str) -> ApiResult<()>;
    /// Forget both tokens
    fn clear(&self);
}

/// Browser `localStorage`, looked up on every call
#[derive(Debug, Clone)]
pub struct LocalStorageTokens {
    access_key: String,
    refresh_key: String,
}

impl LocalStorageTokens {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            access_key: config.access_token_key.clone(),
            refresh_key: config.refresh_token_key.clone(),
        }
    }

    fn storage() -> ApiResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ApiError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ApiError::Storage("localStorage unavailable".to_string()))
    }

    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }
}

impl TokenStore for LocalStorageTokens {
    fn access_token(&self) -> Option<String> {
        self.get(&self.access_key)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(&self.refresh_key)
    }

    fn set_access_token(&self, token: &str) -> ApiResult<()> {
        self.set(&self.access_key, token)
    }

    fn set_refresh_token(&self, token: &str) -> ApiResult<()> {
        self.set(&self.refresh_key, token)
    }

    fn clear(&self) {
        if let Ok(storage) = Self::storage() {
            let _ = storage.remove_item(&self.access_key);
            let _ = storage.remove_item(&self.refresh_key);
        }
    }
}

/// In-process token pair
#[derive(Debug, Default)]
pub struct MemoryTokens {
    tokens: Mutex<(Option<String>, Option<String>)>,
}

impl MemoryTokens {
    pub fn new(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            tokens: Mutex::new((access.map(str::to_string), refresh.map(str::to_string))),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut (Option<String>, Option<String>)) -> R) -> R {
        let mut guard = match self.tokens.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl TokenStore for MemoryTokens {
    fn access_token(&self) -> Option<String> {
        self.with(|t| t.0.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.with(|t| t.1.clone())
    }

    fn set_access_token(&self, token: &str) -> ApiResult<()> {
        self.with(|t| t.0 = Some(token.to_string()));
        Ok(())
    }

    fn set_refresh_token(&self, token: &str) -> ApiResult<()> {
        self.with(|t| t.1 = Some(token.to_string()));
        Ok(())
    }

    fn clear(&self) {
        self.with(|t| *t = (None, None));
    }
}
