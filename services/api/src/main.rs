use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use tokio::net::TcpListener;

use api::{
    jwt::{JwtConfig, JwtService},
    repositories::{AdminRepository, ProductRepository},
    routes,
    state::AppState,
    upload::ImageStore,
};
use common::database::{self, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting admin API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize the JWT service and the image store
    let jwt_service = JwtService::new(JwtConfig::from_env()?);
    let image_store = ImageStore::from_env().await;

    let admin_repository = AdminRepository::new(pool.clone());
    let product_repository = ProductRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        jwt_service,
        admin_repository,
        product_repository,
        image_store,
    };

    info!("Admin API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Admin API listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
