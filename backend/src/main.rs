//! Backend entry-point: connects the record store, seeds users, and serves
//! the selected route group.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::RecordStore;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::store::{RedisRecordStore, StorePool, StorePoolConfig};
use backend::seed::seed_users;
use backend::server::{ServerConfig, ServiceGroup, create_server};

/// Signing secret used when none is configured. Matches what existing dev
/// setups sign with, so their tokens stay verifiable; never use in
/// production.
const DEFAULT_SECRET_KEY: &str = "mi_super_secreto";

#[derive(Parser, Debug)]
#[command(name = "backend", about = "Quotes service over a shared record store", version)]
struct Cli {
    /// Route group this process serves.
    #[arg(long, value_enum, env = "SERVICE", default_value = "all")]
    service: ServiceGroup,

    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// Redis connection URL.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    redis_url: String,

    /// HS256 secret for signing and verifying tokens.
    #[arg(long, env = "SECRET_KEY", hide_env_values = true, default_value = DEFAULT_SECRET_KEY)]
    secret_key: String,

    /// CSV file holding the bootstrap users.
    #[arg(long, env = "SEED_FILE", default_value = "fixtures/initial_data_users.csv")]
    seed_file: PathBuf,
}

fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();
    let cli = Cli::parse();

    if cli.secret_key == DEFAULT_SECRET_KEY {
        warn!("running with the built-in default secret key; set SECRET_KEY for real deployments");
    }

    let pool = StorePool::connect(StorePoolConfig::new(cli.redis_url.clone()))
        .await
        .map_err(std::io::Error::other)?;
    let store: Arc<dyn RecordStore> = Arc::new(RedisRecordStore::new(pool));

    // Seeding belongs to the auth group; quote-only processes must not race it.
    if cli.service.serves(ServiceGroup::Auth) {
        seed_users(store.as_ref(), &cli.seed_file)
            .await
            .map_err(std::io::Error::other)?;
    }

    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(HttpState::new(store, &cli.secret_key));
    let config = ServerConfig::new(cli.service, cli.bind_addr);

    create_server(health_state, http_state, &config)?.await
}
