//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dish_repo;
pub mod place_repo;
pub mod user_repo;

pub use dish_repo::DishRepo;
pub use place_repo::PlaceRepo;
pub use user_repo::UserRepo;
