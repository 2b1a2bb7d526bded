use actix_web::{cookie::{Cookie, SameSite}, web, HttpResponse};
use serde_json::json;

use crate::{auth::ADMIN_COOKIE, startup::CookieSecurity};

// Overwrites the token with an empty, already expired cookie
#[tracing::instrument(
    "Logging out admin",
    skip(cookie_security)
)]
pub async fn logout(cookie_security: web::Data<CookieSecurity>) -> HttpResponse{
    let mut cookie = Cookie::build(ADMIN_COOKIE, "")
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(cookie_security.0)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "success": true }))
}
