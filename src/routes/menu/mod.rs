mod delete;
mod get;
mod post;
mod update;

pub use delete::*;
pub use get::*;
pub use post::*;
pub use update::*;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{db_interaction::MenuQueryError, domain::MenuItemValidationError, utils::{error_fmt_chain, json_error, PoolGetError}};

// Shared by every menu handler
#[derive(Error)]
pub enum MenuRouteError{
    #[error(transparent)]
    ValidationError(#[from] MenuItemValidationError),
    #[error("Menu item not found")]
    NotFound,
    #[error("Menu item id is required")]
    MissingId,
    #[error("Failed to access menu items")]
    QueryError(#[from] MenuQueryError),
    #[error("Failed to access menu items")]
    PoolError(#[from] PoolGetError)
}

impl Debug for MenuRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for MenuRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            MenuRouteError::ValidationError(_) | MenuRouteError::MissingId => StatusCode::BAD_REQUEST,
            MenuRouteError::NotFound => StatusCode::NOT_FOUND,
            MenuRouteError::QueryError(_) | MenuRouteError::PoolError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if self.status_code().is_server_error() {
            tracing::error!("{:?}", self);
        }
        json_error(self.status_code(), self.to_string())
    }
}
