use serde::{Deserialize, Serialize};
use validator::Validate;

use tl_core::domain::entities::token::TokenPair;

/// Body of `POST /api/jwt/create`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenCreateRequest {
    #[serde(alias = "email")]
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,
    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

/// Body of `POST /api/jwt/refresh`
///
/// `refresh` may be omitted when the token travels in the refresh cookie.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Body of `POST /api/jwt/verify`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenVerifyRequest {
    pub token: String,
}

/// Body of `POST /api/logout`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Token pair as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access_token,
            refresh: pair.refresh_token,
        }
    }
}

/// Body of `GET /api/users/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub identifier: String,
}
