// Git module discovering merged pull requests from repository history

mod repository;
mod utils;

// Re-export primary types for public use
pub use repository::GitRepo;

// Re-export utility functions
pub use utils::*;
