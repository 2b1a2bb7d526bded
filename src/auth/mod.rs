pub mod credentials;
pub mod extractors;
pub mod gate;
pub mod jwt;

pub use credentials::AdminCredentials;
pub use extractors::IsAdmin;
pub use gate::{AdminGate, ADMIN_COOKIE, LOGIN_PAGE};
pub use jwt::Tokenizer;
