//! Web layer for the line service.
//!
//! Exposes the cached provider over HTTP.

mod dto;
mod routes;
mod state;

pub use dto::ErrorResponse;
pub use routes::{AppError, create_router};
pub use state::AppState;
