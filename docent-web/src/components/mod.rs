//! Reusable HTML components
//!
//! Components are server-rendered HTML fragments composed into full pages by
//! the handlers. Text arguments are escaped; arguments named `content` are
//! trusted HTML.

pub mod exhibit;
pub mod feedback;
pub mod layout;

// Re-export main component functions
pub use exhibit::{exhibit_list, language_button, qr_link_list};
pub use feedback::{error_code, error_screen, loading_spinner, notification_toast};
pub use layout::{card, escape_html, input, link_button, page_header, post_button};
