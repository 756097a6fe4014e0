//! API route definitions.
//!
//! This module organizes all HTTP routes for the chattylogs server.

mod health;

pub use health::health_routes;
