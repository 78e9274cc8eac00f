//! Docent Web - Visitor and admin web server
//!
//! Server-rendered HTML pages for visitors and administrators, plus the
//! WebSocket bridge that runs one playback controller per open player page.

pub mod components;
pub mod handlers;
pub mod server;
pub mod templates;

// Re-export main types
pub use server::{AppState, WebError, build_router, run_server};
