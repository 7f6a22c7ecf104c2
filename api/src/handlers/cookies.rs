//! Token pair transport through cookies
//!
//! Browser clients receive the pair as HttpOnly cookies next to the JSON
//! body and may send the refresh token back through the cookie instead of
//! the request body.

use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    HttpRequest, HttpResponseBuilder,
};

use tl_core::domain::entities::token::TokenPair;
use tl_shared::config::CookieConfig;

/// Attach both tokens of `pair` as cookies
pub fn set_token_cookies(
    response: &mut HttpResponseBuilder,
    config: &CookieConfig,
    pair: &TokenPair,
) {
    response
        .cookie(token_cookie(
            config,
            &config.access_cookie_name,
            &pair.access_token,
            pair.access_expires_in,
        ))
        .cookie(token_cookie(
            config,
            &config.refresh_cookie_name,
            &pair.refresh_token,
            pair.refresh_expires_in,
        ));
}

/// Expire both token cookies on the client
pub fn clear_token_cookies(response: &mut HttpResponseBuilder, config: &CookieConfig) {
    for name in [&config.access_cookie_name, &config.refresh_cookie_name] {
        let mut cookie = token_cookie(config, name, "", 0);
        cookie.make_removal();
        response.cookie(cookie);
    }
}

/// Non-empty value of the named cookie
pub fn token_from_cookie(message: &HttpRequest, name: &str) -> Option<String> {
    message
        .cookie(name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Refresh token from the request body, falling back to the refresh cookie
pub fn presented_refresh_token(
    body: Option<String>,
    message: &HttpRequest,
    config: &CookieConfig,
) -> Option<String> {
    body.map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| token_from_cookie(message, &config.refresh_cookie_name))
}

fn token_cookie(
    config: &CookieConfig,
    name: &str,
    value: &str,
    max_age_seconds: i64,
) -> Cookie<'static> {
    Cookie::build(name.to_string(), value.to_string())
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}
