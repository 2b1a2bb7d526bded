use actix_web::{cookie::{time, Cookie, SameSite}, http::StatusCode, web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;

use crate::{auth::{AdminCredentials, Tokenizer, ADMIN_COOKIE}, startup::CookieSecurity, utils::{json_error, json_error_into}};

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub username: String,
    pub password: SecretString
}

#[tracing::instrument(
    "Logging in admin",
    skip(credentials, tokenizer, cookie_security, form),
    fields(username = %form.username)
)]
pub async fn login(
    credentials: web::Data<AdminCredentials>,
    tokenizer: web::Data<Tokenizer>,
    cookie_security: web::Data<CookieSecurity>,
    form: web::Json<LoginForm>
) -> Result<HttpResponse, actix_web::Error>{
    let LoginForm{ username, password } = form.into_inner();

    let verified = credentials.verify(&username, password)
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            json_error_into(StatusCode::INTERNAL_SERVER_ERROR, "Failed to login")
        })?;

    if !verified {
        tracing::info!("Admin credentials did not match");
        return Ok(json_error(StatusCode::UNAUTHORIZED, "Invalid credentials"))
    }

    let token = tokenizer.generate_key(&username)
        .map_err(|e| {
            tracing::error!("{:?}", e);
            json_error_into(StatusCode::INTERNAL_SERVER_ERROR, "Failed to login")
        })?;

    let cookie = Cookie::build(ADMIN_COOKIE, token)
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(cookie_security.0)
        .max_age(time::Duration::seconds(tokenizer.lifetime().num_seconds()))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "success": true })))
}
