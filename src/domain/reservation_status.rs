use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Reservation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus{
    Pending,
    Confirmed,
    Rejected
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("a {from} reservation cannot be moved to {to}")]
pub struct InvalidTransition{
    pub from: ReservationStatus,
    pub to: ReservationStatus
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Rejected
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Rejected => "REJECTED"
        }
    }

    pub fn parse(value: &str) -> Result<ReservationStatus, String> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReservationStatus::Pending),
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "REJECTED" => Ok(ReservationStatus::Rejected),
            _ => Err(format!("{} is not a valid reservation status", value))
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReservationStatus::Pending)
    }

    /// PENDING may move to either terminal state. Re-applying the current
    /// status is accepted so an admin can retry a confirm/reject.
    pub fn transition_to(self, target: ReservationStatus) -> Result<ReservationStatus, InvalidTransition> {
        match (self, target) {
            (from, to) if from == to => Ok(to),
            (ReservationStatus::Pending, to) => Ok(to),
            (from, to) => Err(InvalidTransition{ from, to })
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Dashboard filter, applied to an already fetched listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationFilter{
    #[default]
    All,
    Only(ReservationStatus)
}

impl ReservationFilter {
    pub fn parse(value: &str) -> Result<ReservationFilter, String> {
        if value.trim().eq_ignore_ascii_case("ALL") {
            return Ok(ReservationFilter::All)
        }

        ReservationStatus::parse(value).map(ReservationFilter::Only)
    }

    pub fn matches(&self, reservation: &Reservation) -> bool {
        match self {
            ReservationFilter::All => true,
            ReservationFilter::Only(status) => reservation.status == status.as_str()
        }
    }

    pub fn apply(&self, reservations: &[Reservation]) -> Vec<Reservation> {
        reservations.iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts{
    pub all: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub rejected: usize
}

impl StatusCounts {
    pub fn tally(reservations: &[Reservation]) -> StatusCounts {
        reservations.iter().fold(StatusCounts::default(), |mut counts, r| {
            counts.all += 1;
            match ReservationStatus::parse(&r.status) {
                Ok(ReservationStatus::Pending) => counts.pending += 1,
                Ok(ReservationStatus::Confirmed) => counts.confirmed += 1,
                Ok(ReservationStatus::Rejected) => counts.rejected += 1,
                Err(e) => tracing::warn!("{}", e)
            }
            counts
        })
    }
}
