mod menu;
mod reservations;

pub use menu::*;
pub use reservations::*;
