pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;
pub mod visualization;

pub use crate::core::commands::{ChatCommand, parse};
pub use crate::core::errors::SplitchatError;
pub use crate::core::services::SplitchatService;
pub use crate::infrastructure::cache::in_memory::InMemoryCache;
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;
pub use crate::visualization::Visualization;

#[cfg(test)]
mod tests; // Include integration tests
