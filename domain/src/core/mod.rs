//! Core domain primitives

pub mod tokens;
