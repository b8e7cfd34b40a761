// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod matrix;
pub mod state;

// Re-export public types for convenient access via `quditsim::core::TypeName`
pub use error::QuditError;
pub use matrix::Matrix;
pub use state::RegisterState;
