// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod form;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod skeleton;

// Composed layouts
pub mod dashboard_layout;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use dashboard_layout::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use skeleton::*;
