mod availability_guard;
mod booking_service;
mod errors;
pub mod query_engine;
mod view;

pub use availability_guard::authorize;
pub use booking_service::{
    ServiceDependencies, confirm_booking, create_booking, get_booking_by_id,
    has_completed_booking, item_booking_summary, list_by_booker, list_by_owner,
};
pub use errors::{BookingApplicationError, Result};
pub use query_engine::ViewerRole;
pub use view::{BookingInfo, BookingView, ItemBookingSummary};
