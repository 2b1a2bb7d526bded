mod login;
mod logout;
mod pages;

pub use login::*;
pub use logout::*;
pub use pages::*;
