/// Jap Server - daily jap count tracker
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use jap_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use jap_storage::SqliteStorage;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jap-server")]
#[command(about = "Daily jap count tracking server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "JAP_CONFIG")]
        config: Option<PathBuf>,
    },
    /// List all users
    ListUsers {
        /// Configuration file path
        #[arg(short, long, env = "JAP_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jap_server=info,jap_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::ListUsers { config } => {
            list_users(config).await?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load_from(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Jap Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = jap_storage::create_pool(&config.storage.database_url).await?;
    jap_storage::run_migrations(&pool).await?;
    let storage = Arc::new(SqliteStorage::new(pool));
    tracing::info!("Database connected");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expiration_hours,
    ));
    tracing::info!("Auth service initialized");

    let app_state = AppState::new(storage, auth_service);
    let app = create_router(app_state).layer(cors_layer(config.server.frontend_url.as_deref())?);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(frontend_url: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origin) = frontend_url else {
        return Ok(CorsLayer::permissive());
    };

    let origin: HeaderValue = origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn list_users(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path.as_deref())?;
    let pool = jap_storage::create_pool(&config.storage.database_url).await?;
    jap_storage::run_migrations(&pool).await?;

    let users = jap_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({}, {})", user.id, user.name, user.mobile, user.location);
    }

    Ok(())
}
