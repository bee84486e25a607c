//! Infrastructure layer for taskforce
//!
//! Adapters behind the application ports: configuration loading, the
//! file-backed progress store, and built-in native tools.

pub mod config;
pub mod progress;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use progress::FileProgressStore;
pub use tools::CurrentTimeTool;
