//! # streak-judge
//!
//! HTTP client for the solved.ac v3 API implementing the `JudgeClient` port.

mod client;
mod wire;

pub use client::SolvedAcClient;
