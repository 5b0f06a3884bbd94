pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod sync;
pub mod transform;


pub use api::Mode;
pub use config::{Config, Window};
pub use error::Error;
pub use error::Result;

/// Sent with every HTTP request.
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
