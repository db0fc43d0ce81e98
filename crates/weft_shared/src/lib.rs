//! Shared functionality
//!
//! This crate supplies the pieces that both the css3 parser and the flexbox layouter need:
//! the input byte stream, source locations, error types, configuration and geometry.
//!

pub mod byte_stream;
pub mod config;
pub mod errors;
pub mod types;
