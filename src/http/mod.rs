//! HTTP surface: routes, handlers and error responses

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::create_router;
pub use state::AppState;
