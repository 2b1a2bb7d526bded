pub mod email_address;
pub mod menu_category;
pub mod menu_item_input;
pub mod new_reservation;
pub mod phone_number;
pub mod reservation_status;

pub use email_address::EmailAddress;
pub use menu_category::{group_by_category, MenuCategory, MenuSection};
pub use menu_item_input::{MenuItemForm, MenuItemInput, MenuItemValidationError};
pub use new_reservation::{NewReservation, ReservationRequest, ReservationValidationError};
pub use phone_number::PhoneNumber;
pub use reservation_status::{InvalidTransition, ReservationFilter, ReservationStatus, StatusCounts};
