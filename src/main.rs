use shareit_booking::{
    adapters::{
        SystemClock,
        mock::{ItemService as MockItemService, UserService as MockUserService},
        postgres::PostgresBookingRepository,
    },
    api::{handlers::AppState, router::create_router},
    application::booking::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shareit_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize adapters
    // ユーザー・アイテムは外部コンテキスト。接続先が用意されるまではインメモリ実装を使う。
    let booking_repository = Arc::new(PostgresBookingRepository::new(pool));
    let user_service = Arc::new(MockUserService::new());
    let item_service = Arc::new(MockItemService::new());
    let clock = Arc::new(SystemClock);

    // Create service dependencies
    let service_deps = ServiceDependencies {
        booking_repository,
        user_service,
        item_service,
        clock,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
