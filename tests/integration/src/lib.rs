//! Integration test utilities for the solve-streak API
//!
//! This crate provides helpers for running end-to-end tests against the REST
//! API, backed by the in-memory store and a scripted judge.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
