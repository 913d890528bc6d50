//! # Folio Shared
//!
//! Shared configuration, errors, telemetry, and pagination for the Folio site.

pub mod config;
pub mod constants;
pub mod error;
pub mod pagination;
pub mod telemetry;
pub mod utils;

pub use error::AppError;
pub use pagination::{calculate_pagination, paginate, PageItem, PaginationError, PaginationResult};
