//! One-shot admin provisioning
//!
//! Creates the initial admin account from ADMIN_EMAIL / ADMIN_PASSWORD,
//! doing what POST /api/admin/register does without a running server.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{models::NewAdmin, repositories::AdminRepository, validation};
use common::database::{self, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let email = std::env::var("ADMIN_EMAIL")
        .map_err(|_| anyhow::anyhow!("ADMIN_EMAIL environment variable not set"))?;
    let password = std::env::var("ADMIN_PASSWORD")
        .map_err(|_| anyhow::anyhow!("ADMIN_PASSWORD environment variable not set"))?;

    validation::validate_email(&email).map_err(|e| anyhow::anyhow!(e))?;
    validation::validate_password(&password).map_err(|e| anyhow::anyhow!(e))?;

    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admins = AdminRepository::new(pool);

    if admins.find_by_email(&email).await?.is_some() {
        info!("Admin already exists: {}", email);
        return Ok(());
    }

    let admin = admins.create(&NewAdmin { email, password }).await?;
    info!("Admin created successfully: {} ({})", admin.email, admin.id);

    Ok(())
}
