//! Repository layer: stateless structs with async methods over a pool.

pub mod meal_repo;
pub mod plan_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod shopping_repo;
pub mod user_repo;

pub use meal_repo::MealRepo;
pub use plan_repo::PlanRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use shopping_repo::ShoppingRepo;
pub use user_repo::UserRepo;
