//! Query lifecycle test suite


// Test helpers and fixtures
pub mod helpers;
