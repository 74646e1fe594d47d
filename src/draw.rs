//! Rerun drawing of shadow scenes.
//!
//! The scene is drawn by a Rerun viewer spawned from the session. Nothing in
//! the shadow core depends on this module.
pub mod config;
pub mod rerun;

pub use config::DrawConfig;
pub use self::rerun::{draw_scene, start_session};
