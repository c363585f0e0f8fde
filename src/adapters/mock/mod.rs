pub mod clock;
pub mod item_service;
pub mod user_service;

pub use clock::FixedClock;
pub use item_service::ItemService;
pub use user_service::UserService;
