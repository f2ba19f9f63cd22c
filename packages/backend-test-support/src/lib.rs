//! Shared helpers for the backend's integration tests: a one-time test
//! subscriber and assertions on the Problem Details error contract.

pub mod logging;
pub mod problem_details;
