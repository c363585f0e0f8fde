use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, confirm_booking, create_booking, get_booking_by_id, list_booker_bookings,
    list_owner_bookings,
};

/// Creates the API router with all booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /bookings - Request a booking
/// - PATCH /bookings/:id?approved= - Approve or reject a booking
///
/// Query endpoints (Read operations):
/// - GET /bookings/:id - Get booking details
/// - GET /bookings?state=&from=&size= - List bookings as booker
/// - GET /bookings/owner?state=&from=&size= - List bookings as item owner
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/bookings", get(list_booker_bookings).post(create_booking))
        .route("/bookings/owner", get(list_owner_bookings))
        .route(
            "/bookings/:id",
            get(get_booking_by_id).patch(confirm_booking),
        )
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
