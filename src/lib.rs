//! weft: a CSS3 parser with its object model, and a single line flexbox layouter
//!
//! The actual functionality lives in the workspace crates. This crate re-exports them for the
//! command line tools, the integration tests and the benchmarks.

pub use weft_css3 as css3;
pub use weft_flexbox as flexbox;
pub use weft_shared as shared;

pub mod input;
pub mod snippet;
