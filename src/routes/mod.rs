mod admin;
mod health_check;
mod menu;
mod reservation;

pub use admin::*;
pub use health_check::*;
pub use menu::*;
pub use reservation::*;
