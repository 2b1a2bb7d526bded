use actix_web::{http::{header, StatusCode}, web, HttpResponse};

use crate::{db_interaction::get_reservations, utils::{get_pooled_connection, json_error_into, DbPool}};

// Polled by the dashboard; responses are never cached
#[tracing::instrument(
    "Listing reservations",
    skip(pool)
)]
pub async fn list_reservations(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, actix_web::Error> {

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            json_error_into(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch reservations")
        })?;

    let reservations = get_reservations(conn)
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            json_error_into(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch reservations")
        })?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"))
        .insert_header((header::PRAGMA, "no-cache"))
        .insert_header((header::EXPIRES, "0"))
        .json(reservations))
}
