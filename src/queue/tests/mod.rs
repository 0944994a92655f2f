//! Test modules for the queue components
//!
//! Suites are organized by functional area; shared fixtures live in
//! `support`.

mod runner;
mod support;
