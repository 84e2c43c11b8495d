//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod meals;
pub mod onboarding;
pub mod plan;
pub mod profile;
pub mod shopping;
