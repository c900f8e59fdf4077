mod auth;
pub use auth::*;

mod flags;
pub use flags::*;
