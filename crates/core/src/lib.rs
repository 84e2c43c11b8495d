//! FAME domain logic.
//!
//! Pure domain types and algorithms shared by the database and API layers:
//! the draft profile aggregate, the onboarding wizard state machine, weekly
//! plan generation, nutrition summaries, and shopping-list aggregation.
//! This crate has no database or HTTP dependencies.

pub mod catalog;
pub mod error;
pub mod nutrition;
pub mod plan;
pub mod profile;
pub mod shopping;
pub mod types;
pub mod wizard;
