//! Built-in native tools
//!
//! Registered on the dispatcher ahead of external providers, so a
//! built-in always wins a name collision.

pub mod time;

pub use time::CurrentTimeTool;
