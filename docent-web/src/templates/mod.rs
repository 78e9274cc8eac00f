//! Page templates

pub mod base;
pub mod video_player;

pub use base::base_template;
pub use video_player::{VideoPlayerParams, video_player_content};
