//! Port definitions
//!
//! Ports are trait boundaries implemented by the infrastructure layer
//! (or by mocks in tests).

pub mod completion_gateway;
pub mod memory;
pub mod progress;
pub mod progress_store;
