pub mod booking_repository;
pub mod clock;
pub mod item_service;
pub mod user_service;

pub use booking_repository::*;
pub use clock::*;
pub use item_service::*;
pub use user_service::*;
