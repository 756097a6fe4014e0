//! Integration tests for the chattylogs server.
//!
//! These tests drive the HTTP surface through the public router and the
//! startup sequence through the public bootstrap functions.

mod integration_tests {
    pub mod common;
    mod bootstrap_tests;
    mod health_tests;
}
