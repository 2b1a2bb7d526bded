use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{MenuItemInput, NewReservation, ReservationStatus};
use crate::schema::menu_items;
use crate::schema::reservations;

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Reservation{
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: String,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl Reservation {
    // Every new record starts out PENDING
    pub fn from_request(new: NewReservation) -> Self{
        let now = Utc::now();
        Reservation{
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email.inner(),
            phone: new.phone.inner(),
            date: new.date,
            time: new.time,
            guests: new.guests,
            special_requests: new.special_requests,
            status: ReservationStatus::Pending.as_str().to_string(),
            admin_note: None,
            created_at: now,
            updated_at: now
        }
    }

    pub fn status(&self) -> Result<ReservationStatus, String>{
        ReservationStatus::parse(&self.status)
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct MenuItem{
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub menu_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl MenuItem {
    pub fn from_input(input: MenuItemInput) -> Self{
        let now = Utc::now();
        MenuItem{
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            category: input.category.as_str().to_string(),
            price: input.price,
            image_url: input.image_url,
            is_available: input.is_available,
            menu_id: input.menu_id,
            created_at: now,
            updated_at: now
        }
    }
}

// Full replace of the mutable columns; None clears optional ones
#[derive(AsChangeset, Debug)]
#[diesel(table_name = menu_items)]
#[diesel(treat_none_as_null = true)]
pub struct MenuItemChanges{
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub menu_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>
}

impl From<MenuItemInput> for MenuItemChanges {
    fn from(input: MenuItemInput) -> Self {
        MenuItemChanges{
            name: input.name,
            description: input.description,
            category: input.category.as_str().to_string(),
            price: input.price,
            image_url: input.image_url,
            is_available: input.is_available,
            menu_id: input.menu_id,
            updated_at: Utc::now()
        }
    }
}
