pub mod meal;
pub mod plan;
pub mod profile;
pub mod session;
pub mod shopping;
pub mod user;
