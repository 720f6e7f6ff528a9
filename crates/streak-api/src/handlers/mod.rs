//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod maintenance;
pub mod members;
pub mod reports;
