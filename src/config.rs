//! Connection settings for the remote API.

use crate::error::RequiresError;

pub const DEFAULT_BASE_URL: &str = "https://requires.io/api/v2/";

/// Settings shared by every request the client issues.
///
/// - `token`: sent as `Authorization: Token <token>`
/// - `base_url`: API root, always ending with `/` (default [`DEFAULT_BASE_URL`])
/// - `verify_tls`: verify server certificates (default `true`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub token: String,
    pub base_url: String,
    pub verify_tls: bool,
}

impl ApiConfig {
    pub fn new(token: impl Into<String>) -> Result<Self, RequiresError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(RequiresError::MissingToken);
        }
        Ok(Self {
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            verify_tls: true,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }
}
