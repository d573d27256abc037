//! Presentation Layer
//!
//! - `factory` - Builds a `Runtime` from configuration (dependency injection)

pub mod factory;

pub use factory::{create_minifiers, create_runtime, Runtime};
