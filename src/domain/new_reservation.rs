use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;

use super::{EmailAddress, PhoneNumber};

// The reservation form posts guests as the value of a <select>, so accept text too
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum GuestCount{
    Number(i64),
    Text(String)
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest{
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<GuestCount>,
    pub special_requests: Option<String>
}

#[derive(Error, Debug, PartialEq)]
pub enum ReservationValidationError{
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{0}")]
    InvalidField(String)
}

#[derive(Debug, Clone)]
pub struct NewReservation{
    pub name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub date: NaiveDate,
    // Normalised to HH:MM
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> Result<NaiveDate, ReservationValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ReservationValidationError::InvalidField(format!("{} is not a valid date", value)))
}

fn parse_time(value: &str) -> Result<String, ReservationValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| ReservationValidationError::InvalidField(format!("{} is not a valid time", value)))
}

fn parse_guests(value: GuestCount) -> Result<i32, ReservationValidationError> {
    let count = match value {
        GuestCount::Number(n) => n,
        GuestCount::Text(text) => text.trim().parse::<i64>()
            .map_err(|_| ReservationValidationError::InvalidField(format!("{} is not a valid number of guests", text)))?
    };

    i32::try_from(count)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ReservationValidationError::InvalidField(format!("{} is not a valid number of guests", count)))
}

impl NewReservation {
    pub fn parse(request: ReservationRequest) -> Result<NewReservation, ReservationValidationError> {
        let name = non_blank(request.name);
        let email = non_blank(request.email);
        let phone = non_blank(request.phone);
        let date = non_blank(request.date);
        let time = non_blank(request.time);
        let guests = request.guests;

        let missing: Vec<&'static str> = [
            ("name", name.is_none()),
            ("email", email.is_none()),
            ("phone", phone.is_none()),
            ("date", date.is_none()),
            ("time", time.is_none()),
            ("guests", guests.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (name, email, phone, date, time, guests) {
            (Some(name), Some(email), Some(phone), Some(date), Some(time), Some(guests)) => {
                Ok(NewReservation{
                    name,
                    email: EmailAddress::parse(email).map_err(ReservationValidationError::InvalidField)?,
                    phone: PhoneNumber::parse(phone).map_err(ReservationValidationError::InvalidField)?,
                    date: parse_date(&date)?,
                    time: parse_time(&time)?,
                    guests: parse_guests(guests)?,
                    special_requests: non_blank(request.special_requests)
                })
            },
            _ => Err(ReservationValidationError::MissingFields(missing))
        }
    }
}
