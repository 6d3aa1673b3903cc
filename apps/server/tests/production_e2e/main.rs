//! Production workflow E2E test suite.
//!
//! Runs the services and HTTP handlers against a throwaway SQLite database and a temporary
//! report directory. No external services are needed.
//!
//! Run with: cargo test --test production_e2e

mod test_helpers;

mod test_api_auth;
mod test_registry;
mod test_stage_lifecycle;
