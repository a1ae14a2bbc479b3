//! Integration tests exercising the public API end to end.

mod dashboard_api;
mod scenarios;
