//! CYBERCAB: demand and revenue estimator for an autonomous ride-hailing fleet.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod model;
pub mod insights;
pub mod dashboard;
