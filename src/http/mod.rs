//! HTTP surface of the dashboard.
//!
//! `/` serves the interactive page, `/api/views` the same views as JSON.
//! Every request recomputes the views from the shared read-only datasets.

mod error;
mod handlers;
mod router;
mod state;

pub use error::{ApiError, AppError};
pub use handlers::selection_from_query;
pub use router::create_router;
pub use state::AppState;
