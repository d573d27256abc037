//! Minifier Implementations
//!
//! Minification itself is delegated to external compressors.

mod command;

pub use command::CommandMinifier;
