#![allow(dead_code)]

// tests/common/mod.rs
pub mod proptest_prelude;

use serde_json::Value;

// Logging is auto-installed for every test binary that includes this module.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Reads an integer field, panicking with the whole body when absent.
pub fn int_field(json: &Value, key: &str) -> i64 {
    json[key]
        .as_i64()
        .unwrap_or_else(|| panic!("missing integer field {key:?} in {json}"))
}
