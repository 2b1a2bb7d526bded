use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::IsAdmin,
    db_interaction::{update_reservation_status, UpdateReservationStatusError},
    domain::ReservationStatus,
    notifications::Notifier,
    utils::{error_fmt_chain, get_pooled_connection, json_error, DbPool, PoolGetError}
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateBody{
    pub status: Option<String>,
    pub admin_note: Option<String>
}

// Body of PATCH /api/admin/reservations, which names the reservation inline
#[derive(Deserialize, Debug)]
pub struct StatusUpdateWithId{
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub update: StatusUpdateBody
}

#[derive(Error)]
pub enum StatusUpdateError{
    #[error("Missing required fields: id")]
    MissingId,
    #[error("Missing required fields: status")]
    MissingStatus,
    #[error("{0}")]
    InvalidStatus(String),
    #[error(transparent)]
    UpdateError(#[from] UpdateReservationStatusError),
    #[error("Failed to update reservation")]
    PoolError(#[from] PoolGetError)
}

impl Debug for StatusUpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for StatusUpdateError {
    fn status_code(&self) -> StatusCode {
        match self {
            StatusUpdateError::MissingId
                | StatusUpdateError::MissingStatus
                | StatusUpdateError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            StatusUpdateError::UpdateError(UpdateReservationStatusError::InvalidTransition(_)) => StatusCode::BAD_REQUEST,
            StatusUpdateError::UpdateError(UpdateReservationStatusError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if self.status_code().is_server_error() {
            tracing::error!("{:?}", self);
            return json_error(self.status_code(), "Failed to update reservation")
        }
        json_error(self.status_code(), self.to_string())
    }
}

async fn apply_status_update(
    pool: &web::Data<DbPool>,
    notifier: &Notifier,
    reservation_id: Uuid,
    body: StatusUpdateBody
) -> Result<HttpResponse, StatusUpdateError> {
    let StatusUpdateBody{ status, admin_note } = body;

    let status = status
        .filter(|s| !s.trim().is_empty())
        .ok_or(StatusUpdateError::MissingStatus)?;
    let target = ReservationStatus::parse(&status)
        .map_err(StatusUpdateError::InvalidStatus)?;

    let conn = get_pooled_connection(pool).await?;
    let updated = update_reservation_status(conn, reservation_id, target, admin_note).await?;

    if let Err(e) = notifier.status_changed(&updated, target, updated.admin_note.as_deref()).await {
        tracing::error!(reservation_id = %updated.id, "Failed to send status email: {:?}", e);
    }

    Ok(HttpResponse::Ok().json(updated))
}

/// Moves a reservation to CONFIRMED or REJECTED and emails the guest.
/// Both `/api/admin/reservations/{id}` and `/api/reservation/{id}` land here.
#[tracing::instrument(
    "Updating reservation status",
    skip(pool, notifier, body, _admin)
)]
pub async fn update_reservation(
    pool: web::Data<DbPool>,
    notifier: web::Data<Notifier>,
    path: web::Path<Uuid>,
    body: web::Json<StatusUpdateBody>,
    _admin: IsAdmin
) -> Result<HttpResponse, StatusUpdateError>{
    apply_status_update(&pool, &notifier, path.into_inner(), body.into_inner()).await
}

#[tracing::instrument(
    "Updating reservation status from body id",
    skip(pool, notifier, body, _admin)
)]
pub async fn update_reservation_by_body(
    pool: web::Data<DbPool>,
    notifier: web::Data<Notifier>,
    body: web::Json<StatusUpdateWithId>,
    _admin: IsAdmin
) -> Result<HttpResponse, StatusUpdateError>{
    let StatusUpdateWithId{ id, update } = body.into_inner();
    let reservation_id = id.ok_or(StatusUpdateError::MissingId)?;

    apply_status_update(&pool, &notifier, reservation_id, update).await
}
