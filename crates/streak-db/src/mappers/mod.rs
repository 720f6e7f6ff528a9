//! Entity to model mappers
//!
//! This module provides conversions between domain entities (streak-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects, rejecting
//!   ranks outside the judge's scale
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod attendance;
mod member;
mod problem;

pub use member::{MemberInsert, MemberUpdate};
