pub mod types;
pub mod settings;
pub mod errors;

// Re-export AppError for convenience
pub use errors::{AppError, AppResult};
