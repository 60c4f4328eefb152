// Parser test modules
//
// These modules contain selector-level test cases: accepted text with its
// canonical rendering, and rejected text with its diagnostic.

pub mod selector_tests;
