pub mod game;
pub mod ai;
pub mod session;
pub mod text;
pub mod api;
pub mod error;
pub mod config;

pub use error::{GameError, SessionError, Result};
pub use config::Config;
