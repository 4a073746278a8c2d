use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database;
use tracker::{
    config::ServerConfig,
    repositories::{ItemRepository, SessionRepository, UserRepository},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting tracker service");

    // Read the server binding from the config file
    let server_config = ServerConfig::load()?;

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Bootstrap the tables on first start
    database::ensure_schema(&pool).await?;

    info!("Tracker service initialized successfully");

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let session_repository = SessionRepository::new(pool.clone());
    let item_repository = ItemRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        session_repository,
        item_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = server_config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Tracker service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
