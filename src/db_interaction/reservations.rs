use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::Utc;
use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{domain::{InvalidTransition, ReservationStatus}, models::Reservation, schema::reservations, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

// Error associated with inserting a reservation
#[derive(Error)]
pub enum ReservationInsertError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to insert into reservations table")]
    InsertError(#[from] diesel::result::Error)
}

impl Debug for ReservationInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting reservation into the database",
    skip_all,
    fields(reservation_id = %reservation.id)
)]
pub async fn insert_reservation(
    mut conn: DbConnection,
    reservation: Reservation
) -> Result<Reservation, ReservationInsertError> {

    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(reservations::table)
            .values(&reservation)
            .returning(Reservation::as_returning())
            .get_result(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting reservations from db",
    skip_all
)]
pub async fn get_reservations(
    mut conn: DbConnection
) -> Result<Vec<Reservation>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        reservations::table
            .order(reservations::created_at.desc())
            .select(Reservation::as_select())
            .load::<Reservation>(&mut conn)
            .context("Failed to get reservations")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Error associated with updating reservation status
#[derive(Error)]
pub enum UpdateReservationStatusError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("Reservation not found")]
    NotFound(Uuid),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error("Stored status is not recognised: {0}")]
    CorruptStatus(String)
}

impl Debug for UpdateReservationStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

/// Checks the transition against the stored status and writes the new one
/// in the same transaction. The note is only replaced when one is given.
#[tracing::instrument(
    "Updating reservation status",
    skip(conn, note)
)]
pub async fn update_reservation_status(
    mut conn: DbConnection,
    reservation_id: Uuid,
    target: ReservationStatus,
    note: Option<String>
) -> Result<Reservation, UpdateReservationStatusError> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Reservation, UpdateReservationStatusError, _>(|conn| {
            let current: String = reservations::table
                .find(reservation_id)
                .select(reservations::status)
                .first::<String>(conn)
                .optional()?
                .ok_or(UpdateReservationStatusError::NotFound(reservation_id))?;

            let current = ReservationStatus::parse(&current)
                .map_err(UpdateReservationStatusError::CorruptStatus)?;
            let next = current.transition_to(target)?;

            let target_row = reservations::table.find(reservation_id);
            let now = Utc::now();

            let updated = match note {
                Some(note) => diesel::update(target_row)
                    .set((
                        reservations::status.eq(next.as_str()),
                        reservations::admin_note.eq(note),
                        reservations::updated_at.eq(now)
                    ))
                    .returning(Reservation::as_returning())
                    .get_result(conn)?,
                None => diesel::update(target_row)
                    .set((
                        reservations::status.eq(next.as_str()),
                        reservations::updated_at.eq(now)
                    ))
                    .returning(Reservation::as_returning())
                    .get_result(conn)?
            };

            Ok(updated)
        })
    })
    .await??;

    Ok(res)
}

// Error associated with deleting a reservation
#[derive(Error)]
pub enum DeleteReservationError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("Reservation not found")]
    NotFound(Uuid),
    #[error("Pending reservations must be confirmed or rejected before they can be deleted")]
    StillPending(Uuid)
}

impl Debug for DeleteReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Only CONFIRMED and REJECTED reservations can be removed
#[tracing::instrument(
    "Deleting reservation",
    skip(conn)
)]
pub async fn delete_reservation(
    mut conn: DbConnection,
    reservation_id: Uuid
) -> Result<(), DeleteReservationError> {

    spawn_blocking_with_tracing(move || {
        conn.transaction::<(), DeleteReservationError, _>(|conn| {
            let status: String = reservations::table
                .find(reservation_id)
                .select(reservations::status)
                .first::<String>(conn)
                .optional()?
                .ok_or(DeleteReservationError::NotFound(reservation_id))?;

            if status == ReservationStatus::Pending.as_str() {
                return Err(DeleteReservationError::StillPending(reservation_id))
            }

            diesel::delete(reservations::table.find(reservation_id))
                .execute(conn)?;

            Ok(())
        })
    })
    .await??;

    Ok(())
}
