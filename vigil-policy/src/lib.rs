pub mod analyzer;
pub mod examples;

pub use analyzer::validate;
pub use examples::{PolicyExample, examples};
