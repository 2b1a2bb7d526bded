use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::IsAdmin,
    db_interaction::{delete_reservation, DeleteReservationError},
    utils::{error_fmt_chain, get_pooled_connection, json_error, DbPool, PoolGetError}
};

#[derive(Error)]
pub enum RemoveReservationError{
    #[error(transparent)]
    DeleteError(#[from] DeleteReservationError),
    #[error("Failed to delete reservation")]
    PoolError(#[from] PoolGetError)
}

impl Debug for RemoveReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for RemoveReservationError {
    fn status_code(&self) -> StatusCode {
        match self {
            RemoveReservationError::DeleteError(DeleteReservationError::StillPending(_)) => StatusCode::BAD_REQUEST,
            RemoveReservationError::DeleteError(DeleteReservationError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if self.status_code().is_server_error() {
            tracing::error!("{:?}", self);
            return json_error(self.status_code(), "Failed to delete reservation")
        }
        json_error(self.status_code(), self.to_string())
    }
}

#[tracing::instrument(
    "Removing reservation",
    skip(pool, _admin)
)]
pub async fn remove_reservation(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _admin: IsAdmin
) -> Result<HttpResponse, RemoveReservationError>{

    let conn = get_pooled_connection(&pool).await?;
    delete_reservation(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
