use actix_web::{http::StatusCode, web, FromRequest};
use futures_util::future::{ready, Ready};

use crate::utils::json_error_into;

use super::{gate::ADMIN_COOKIE, jwt::Tokenizer};

// Extractor for handlers that need the admin token, holds the admin username
pub struct IsAdmin(pub String);

impl FromRequest for IsAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let tokenizer = match req.app_data::<web::Data<Tokenizer>>() {
            Some(tokenizer) => tokenizer,
            None => return ready(Err(json_error_into(StatusCode::INTERNAL_SERVER_ERROR, "Tokenizer not configured")))
        };

        let claims = req.cookie(ADMIN_COOKIE)
            .and_then(|cookie| tokenizer.decode_key(cookie.value()));

        match claims {
            Some(claims) => ready(Ok(IsAdmin(claims.sub))),
            None => ready(Err(json_error_into(StatusCode::UNAUTHORIZED, "Not authorized")))
        }
    }
}
