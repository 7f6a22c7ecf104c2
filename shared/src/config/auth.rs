//! Authentication configuration: signing keys, token lifetimes and key rotation

use serde::{Deserialize, Serialize};

/// Secret used when `JWT_SECRET` is not provided. Rejected in production.
pub const DEFAULT_DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Upper bound for token lifetimes and the key overlap window (10 years)
pub const MAX_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Current secret used to sign HS256 tokens
    pub secret: String,

    /// Secret retired by the last rotation, still accepted during the overlap window
    #[serde(default)]
    pub previous_secret: Option<String>,

    /// Unix timestamp (seconds) at which the previous key was retired
    #[serde(default)]
    pub previous_retired_at: Option<i64>,

    /// How long after retirement the previous key still verifies, in seconds
    #[serde(default = "default_key_overlap_window")]
    pub key_overlap_window: i64,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,

    /// Algorithm for JWT signing (HS256 or RS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Path to the RS256 private key (PEM)
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// Path to the RS256 public key (PEM)
    #[serde(default)]
    pub public_key_path: Option<String>,

    /// Path to the retired RS256 public key (PEM)
    #[serde(default)]
    pub previous_public_key_path: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_DEVELOPMENT_SECRET),
            previous_secret: None,
            previous_retired_at: None,
            key_overlap_window: default_key_overlap_window(),
            access_token_expiry: 300,     // 5 minutes
            refresh_token_expiry: 86400,  // 24 hours
            issuer: String::from("tokenline"),
            audience: None,
            algorithm: default_algorithm(),
            private_key_path: None,
            public_key_path: None,
            previous_public_key_path: None,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load the JWT settings from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            secret: env_or("JWT_SECRET", DEFAULT_DEVELOPMENT_SECRET.to_string()),
            previous_secret: env_optional("JWT_PREVIOUS_SECRET"),
            previous_retired_at: env_optional("JWT_PREVIOUS_SECRET_RETIRED_AT")
                .and_then(|value| value.parse().ok()),
            key_overlap_window: env_or("JWT_KEY_OVERLAP_WINDOW", defaults.key_overlap_window),
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
            issuer: env_or("JWT_ISSUER", defaults.issuer),
            audience: env_optional("JWT_AUDIENCE"),
            algorithm: env_or("JWT_ALGORITHM", defaults.algorithm).to_uppercase(),
            private_key_path: env_optional("JWT_PRIVATE_KEY_PATH"),
            public_key_path: env_optional("JWT_PUBLIC_KEY_PATH"),
            previous_public_key_path: env_optional("JWT_PREVIOUS_PUBLIC_KEY_PATH"),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in hours
    pub fn with_refresh_expiry_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiry = hours * 3600;
        self
    }

    /// Register the secret retired by a rotation and when it was retired
    pub fn with_previous_secret(mut self, secret: impl Into<String>, retired_at: i64) -> Self {
        self.previous_secret = Some(secret.into());
        self.previous_retired_at = Some(retired_at);
        self
    }

    /// Set the overlap window in seconds
    pub fn with_key_overlap_window(mut self, seconds: i64) -> Self {
        self.key_overlap_window = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_DEVELOPMENT_SECRET
    }

    /// Check if tokens are signed with RS256
    pub fn is_rs256(&self) -> bool {
        self.algorithm.eq_ignore_ascii_case("RS256")
    }

    /// Validate lifetimes, overlap window and algorithm-specific settings
    pub fn validate(&self) -> Result<(), String> {
        if self.access_token_expiry <= 0 {
            return Err("access token expiry must be positive".to_string());
        }
        if self.refresh_token_expiry <= 0 {
            return Err("refresh token expiry must be positive".to_string());
        }
        if self.key_overlap_window < 0 {
            return Err("key overlap window must not be negative".to_string());
        }
        if self.access_token_expiry > MAX_LIFETIME_SECONDS
            || self.refresh_token_expiry > MAX_LIFETIME_SECONDS
            || self.key_overlap_window > MAX_LIFETIME_SECONDS
        {
            return Err(format!(
                "token lifetimes and the key overlap window must not exceed {} seconds",
                MAX_LIFETIME_SECONDS
            ));
        }

        match self.algorithm.to_uppercase().as_str() {
            "HS256" => {
                if self.secret.is_empty() {
                    return Err("JWT_SECRET must not be empty".to_string());
                }
                Ok(())
            }
            "RS256" => {
                if self.private_key_path.is_none() || self.public_key_path.is_none() {
                    return Err(
                        "RS256 requires JWT_PRIVATE_KEY_PATH and JWT_PUBLIC_KEY_PATH".to_string(),
                    );
                }
                Ok(())
            }
            other => Err(format!("unsupported JWT algorithm: {}", other)),
        }
    }
}

/// Cookies carrying the token pair for browser clients
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Name of the access token cookie
    pub access_cookie_name: String,

    /// Name of the refresh token cookie
    pub refresh_cookie_name: String,

    /// Cookie path
    pub path: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// SameSite attribute: `Strict`, `Lax` or `None`
    pub same_site: String,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("access"),
            refresh_cookie_name: String::from("refresh"),
            path: String::from("/"),
            secure: false,  // Set to true in production
            same_site: String::from("Lax"),
            http_only: default_http_only(),
        }
    }
}

impl CookieConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_cookie_name: env_or("COOKIE_ACCESS_NAME", defaults.access_cookie_name),
            refresh_cookie_name: env_or("COOKIE_REFRESH_NAME", defaults.refresh_cookie_name),
            path: env_or("COOKIE_PATH", defaults.path),
            secure: env_or("COOKIE_SECURE", defaults.secure),
            same_site: env_or("COOKIE_SAME_SITE", defaults.same_site),
            http_only: env_or("COOKIE_HTTP_ONLY", defaults.http_only),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Token cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,

    /// bcrypt cost used when hashing passwords for the in-memory store
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookies: CookieConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cookies: CookieConfig::from_env(),
            bcrypt_cost: env_or("BCRYPT_COST", default_bcrypt_cost()),
        }
    }

    /// Get access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.access_token_expiry
    }

    /// Get refresh token expiry in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.jwt.refresh_token_expiry
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_key_overlap_window() -> i64 {
    3600 // 1 hour
}

fn default_http_only() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 300);
        assert_eq!(config.refresh_token_expiry, 86400);
        assert_eq!(config.key_overlap_window, 3600);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.previous_secret.is_none());
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(10)
            .with_refresh_expiry_hours(48)
            .with_previous_secret("old-secret", 1_700_000_000)
            .with_key_overlap_window(600);

        assert_eq!(config.access_token_expiry, 600);
        assert_eq!(config.refresh_token_expiry, 172800);
        assert_eq!(config.previous_secret.as_deref(), Some("old-secret"));
        assert_eq!(config.previous_retired_at, Some(1_700_000_000));
        assert_eq!(config.key_overlap_window, 600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_validate_rejects_bad_lifetimes() {
        let mut config = JwtConfig::new("secret");
        assert!(config.validate().is_ok());

        config.access_token_expiry = 0;
        assert!(config.validate().is_err());

        config.access_token_expiry = 300;
        config.key_overlap_window = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_lifetimes() {
        let mut config = JwtConfig::new("secret");
        config.refresh_token_expiry = i64::MAX / 100;
        assert!(config.validate().is_err());

        config.refresh_token_expiry = MAX_LIFETIME_SECONDS;
        assert!(config.validate().is_ok());

        config.key_overlap_window = MAX_LIFETIME_SECONDS + 1;
        assert!(config.validate().is_err());

        config.key_overlap_window = 3600;
        config.access_token_expiry = i64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cookie_config_default() {
        let config = CookieConfig::default();
        assert_eq!(config.access_cookie_name, "access");
        assert_eq!(config.refresh_cookie_name, "refresh");
        assert!(config.http_only);
        assert!(!config.secure);
        assert_eq!(config.same_site, "Lax");
    }

    #[test]
    fn test_validate_rs256_requires_key_paths() {
        let mut config = JwtConfig::new("secret");
        config.algorithm = "RS256".to_string();
        assert!(config.is_rs256());
        assert!(config.validate().is_err());

        config.private_key_path = Some("keys/private.pem".to_string());
        config.public_key_path = Some("keys/public.pem".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_algorithm() {
        let mut config = JwtConfig::new("secret");
        config.algorithm = "none".to_string();
        assert!(config.validate().is_err());
    }
}
