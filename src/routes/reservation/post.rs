use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    db_interaction::{insert_reservation, ReservationInsertError},
    domain::{NewReservation, ReservationRequest, ReservationValidationError},
    models::Reservation,
    notifications::Notifier,
    utils::{error_fmt_chain, get_pooled_connection, json_error, DbPool, PoolGetError}
};

#[derive(Error)]
pub enum CreateReservationError{
    #[error(transparent)]
    ValidationError(#[from] ReservationValidationError),
    #[error("Failed to process reservation")]
    InsertError(#[from] ReservationInsertError),
    #[error("Failed to process reservation")]
    PoolError(#[from] PoolGetError)
}

impl Debug for CreateReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for CreateReservationError {
    fn status_code(&self) -> StatusCode {
        match self {
            CreateReservationError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if self.status_code().is_server_error() {
            tracing::error!("{:?}", self);
        }
        json_error(self.status_code(), self.to_string())
    }
}

/// Stores a new PENDING reservation, then emails the restaurant and the
/// guest. A failed email never undoes the stored record.
#[tracing::instrument(
    "Creating a reservation",
    skip(pool, notifier, request)
)]
pub async fn create_reservation(
    pool: web::Data<DbPool>,
    notifier: web::Data<Notifier>,
    request: web::Json<ReservationRequest>
) -> Result<HttpResponse, CreateReservationError>{

    let new_reservation = NewReservation::parse(request.into_inner())?;

    let conn = get_pooled_connection(&pool).await?;
    let reservation = insert_reservation(conn, Reservation::from_request(new_reservation)).await?;

    if let Err(e) = notifier.reservation_received(&reservation).await {
        tracing::error!(reservation_id = %reservation.id, "Failed to send reservation emails: {:?}", e);
    }

    Ok(HttpResponse::Created().json(reservation))
}
