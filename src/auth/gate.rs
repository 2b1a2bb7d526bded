use std::rc::Rc;

use actix_web::{dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform}, http::{header, StatusCode}, web, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::Instrument;

use crate::utils::json_error;

use super::jwt::Tokenizer;

pub const ADMIN_COOKIE: &str = "admin_token";
pub const LOGIN_PAGE: &str = "/admin/login";

// What a request without a valid admin_token gets back
#[derive(Clone, Copy, Debug)]
pub enum Rejection{
    RedirectToLogin,
    Unauthorized
}

/// Guards admin routes. A request passes when it carries an `admin_token`
/// cookie whose token still decodes with the application's `Tokenizer`.
/// Paths listed in `exempt` pass untouched.
#[derive(Clone)]
pub struct AdminGate{
    rejection: Rejection,
    exempt: Rc<Vec<&'static str>>
}

impl AdminGate {
    pub fn redirecting() -> Self {
        Self{ rejection: Rejection::RedirectToLogin, exempt: Rc::new(Vec::new()) }
    }

    pub fn rejecting() -> Self {
        Self{ rejection: Rejection::Unauthorized, exempt: Rc::new(Vec::new()) }
    }

    pub fn exempt(mut self, paths: &[&'static str]) -> Self {
        self.exempt = Rc::new(paths.to_vec());
        self
    }
}

impl<S> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future: 'static
{
    type Response = ServiceResponse;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AdminGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGateMiddleware{
            service,
            rejection: self.rejection,
            exempt: self.exempt.clone()
        }))
    }
}


pub struct AdminGateMiddleware<S>{
    service: S,
    rejection: Rejection,
    exempt: Rc<Vec<&'static str>>
}

fn has_valid_token(req: &ServiceRequest) -> bool {
    let Some(cookie) = req.cookie(ADMIN_COOKIE) else {
        return false
    };

    match req.app_data::<web::Data<Tokenizer>>() {
        Some(tokenizer) => tokenizer.decode_key(cookie.value()).is_some(),
        None => {
            tracing::error!("Tokenizer missing from application data");
            false
        }
    }
}

impl<S> Service<ServiceRequest> for AdminGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future : 'static
{
    type Response = S::Response;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    #[tracing::instrument(
        "Checking admin token",
        skip(self, req),
        fields(path = %req.path())
    )]
    fn call(&self, req: ServiceRequest) -> Self::Future {
        let current_span = tracing::Span::current();

        let exempt = self.exempt.iter().any(|p| *p == req.path());

        if !exempt && !has_valid_token(&req) {
            tracing::info!("Missing or invalid admin token");

            let response = match self.rejection {
                Rejection::RedirectToLogin => HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, LOGIN_PAGE))
                    .finish(),
                Rejection::Unauthorized => json_error(StatusCode::UNAUTHORIZED, "Not authorized")
            };

            return Box::pin(
                ready(Ok(req.into_response(response)))
                    .instrument(current_span)
            )
        }

        let fut = self.service.call(req);

        Box::pin(
            async move {
                let res = fut.await?;
                Ok(res)
            }
            .instrument(current_span)
        )
    }
}
