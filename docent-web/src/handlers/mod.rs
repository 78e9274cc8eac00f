//! HTTP request handlers

pub mod admin;
pub mod api;
pub mod auth;
pub mod pages;
pub mod player_socket;

pub use admin::{add_exhibit, admin_page, generate_links, remove_exhibit, set_base_url};
pub use api::api_exhibits;
pub use auth::{SESSION_COOKIE, auth_page, session_from_headers, sign_in, sign_out};
pub use pages::{home_page, language_redirect, scan_demo, scan_page, video_page};
pub use player_socket::{BridgeOutbound, ClientFrame, PlayerBridge, ServerFrame, player_socket};
