pub mod error;
mod lower;
pub mod raw;

// Re-exports for clean API
pub use raw::{FilterParser, Rule};
