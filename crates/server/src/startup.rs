use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use migration::{Migrator, MigratorTrait};
use service::posts::repo::seaorm::SeaOrmPostRepository;
use service::posts::repository::PostRepository;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::observability;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Configuration from `SERVER_HOST`, `SERVER_PORT` and `DATABASE_URL`, used when no
/// usable config file exists.
pub fn config_from_env() -> AppConfig {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    AppConfig {
        server: ServerConfig { host, port, ..ServerConfig::default() },
        database: DatabaseConfig::from_url(models::db::DATABASE_URL.as_str()),
        ..AppConfig::default()
    }
}

/// Public entry: connect, migrate, build the app and serve until the listener fails
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;
    info!("migrations applied");

    let repo: Arc<dyn PostRepository> = Arc::new(SeaOrmPostRepository::new(db));
    let state = ServerState::new(repo);

    if let Some(admin_addr) = cfg.server.admin_addr.as_deref() {
        common::admin_http::spawn_admin_server(admin_addr, observability::encode_metrics);
    }

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
