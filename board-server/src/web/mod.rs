//! Web layer for the station boards.
//!
//! Provides HTTP endpoints for station search and station boards.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
