//! Authentication route handlers
//!
//! Registration and login issue a session token in the body and in the
//! HttpOnly session cookie. Logout clears the cookie; tokens are not
//! revoked server-side and stay valid until they expire.

pub mod login;
pub mod logout;
pub mod register;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use ks_shared::SessionConfig;

/// Session cookie carrying `token` for `max_age_secs`
pub fn session_cookie(config: &SessionConfig, token: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

/// Expired cookie that makes the browser drop the session
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), String::new())
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .finish();
    cookie.make_removal();
    cookie
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}
