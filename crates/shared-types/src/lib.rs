pub mod error;
pub mod feature_flags;

// Session and identity
pub mod guard;
pub mod identity;
pub mod requests;
pub mod role;

// Navigation and page content
pub mod clock;
pub mod content;
pub mod routing;

pub use error::*;
pub use feature_flags::*;

pub use guard::*;
pub use identity::*;
pub use requests::*;
pub use role::*;

pub use clock::*;
pub use content::*;
pub use routing::*;
