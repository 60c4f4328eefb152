// Test helper macros and utilities for label selector tests
// These macros provide consistent patterns for testing parse results
#![allow(unused_macros, dead_code)]

/// Assert that input parses successfully, returning the selector
macro_rules! assert_parses {
    ($input:expr) => {{
        let result = rusty_label_selector::try_parse($input);
        assert!(
            result.is_ok(),
            "Expected '{}' to parse successfully, got error: {:?}",
            $input,
            result.as_ref().err()
        );
        result.unwrap()
    }};
}

/// Assert that input fails to parse
macro_rules! assert_parse_error {
    ($input:expr) => {{
        let result = rusty_label_selector::try_parse($input);
        assert!(
            result.is_err(),
            "Expected '{}' to fail parsing, but got: {:?}",
            $input,
            result.as_ref().ok()
        );
        result.unwrap_err()
    }};
    ($input:expr, $error_contains:expr) => {{
        let err = assert_parse_error!($input);
        let err_str = err.to_string();
        assert!(
            err_str.contains($error_contains),
            "Expected error for '{}' to contain '{}', got: {}",
            $input,
            $error_contains,
            err_str
        );
        err
    }};
}

/// Assert parse-print roundtrip reproduces the same selector
macro_rules! assert_roundtrip {
    ($input:expr) => {{
        let selector = assert_parses!($input);
        let printed = selector.to_string();
        let reparsed = rusty_label_selector::try_parse(&printed);
        assert_eq!(
            reparsed.as_ref().ok(),
            Some(&selector),
            "Roundtrip failed: '{}' -> '{}' reparsed as {:?}",
            $input,
            printed,
            reparsed
        );
        printed
    }};
}

/// Test case structure for parameterized tests
#[derive(Debug, Clone)]
pub struct TestCase {
    pub input: &'static str,
    pub should_fail: bool,
    pub error_contains: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl TestCase {
    pub const fn valid(input: &'static str) -> Self {
        Self {
            input,
            should_fail: false,
            error_contains: None,
            description: None,
        }
    }

    pub const fn invalid(input: &'static str) -> Self {
        Self {
            input,
            should_fail: true,
            error_contains: None,
            description: None,
        }
    }

    pub const fn invalid_with_error(input: &'static str, error: &'static str) -> Self {
        Self {
            input,
            should_fail: true,
            error_contains: Some(error),
            description: None,
        }
    }

    pub const fn with_description(mut self, desc: &'static str) -> Self {
        self.description = Some(desc);
        self
    }
}
