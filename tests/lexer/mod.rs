// Lexer test module
// Re-exports token-level test cases

pub mod label_tests;

// Re-export all test data for convenience
pub use label_tests::*;
