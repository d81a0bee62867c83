use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use db_pool::{create_pool, env_utils::parse_env_or, DbConfig};
use sns_service::config::{Config, CorsConfig, LogFormat};
use sns_service::{db, routes};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "sns-service";

fn init_tracing(format: LogFormat) {
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into())
    };

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    for origin in config.origins() {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// `sns-service healthcheck`: probe the local health endpoint for container
/// health checks.
async fn run_healthcheck() -> io::Result<()> {
    let port: u16 = parse_env_or("SNS_SERVICE_PORT", 8000)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let url = format!("http://127.0.0.1:{}/api/health", port);

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {}", e);
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// SNS Service
///
/// REST backend for a small social feed: posts, comments on posts, and
/// per-user likes with a consistent like counter.
///
/// # Routes
///
/// - `/api/posts/*` - Posts, their comments and their likes
/// - `/api/health`, `/api/health/live` - Health probes
/// - `/metrics` - Prometheus exposition
#[actix_web::main]
async fn main() -> io::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        return run_healthcheck().await;
    }

    let _ = dotenvy::dotenv();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.logging.format);

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_config = DbConfig::from_env(
        SERVICE_NAME,
        &config.database.url,
        config.database.max_connections,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    db_config.log_config();

    let db_pool = create_pool(db_config).await.map_err(|e| {
        tracing::error!("Database pool creation failed: {}", e);
        io::Error::new(io::ErrorKind::Other, format!("Database error: {}", e))
    })?;

    if config.database.run_migrations {
        db::run_migrations(&db_pool).await.map_err(|e| {
            tracing::error!("Database migrations failed: {}", e);
            io::Error::new(io::ErrorKind::Other, format!("Migration error: {}", e))
        })?;
        tracing::info!("Database migrations applied");
    } else {
        tracing::info!("Skipping database migrations (RUN_MIGRATIONS=false)");
    }

    let bind_address = config.app.bind_address();
    tracing::info!("Listening on {}", bind_address);

    let pool_data = web::Data::new(db_pool.clone());
    let cors_config = config.cors.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .wrap(build_cors(&cors_config))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .workers(config.app.workers)
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let result = tokio::select! {
        joined = server_task => match joined {
            Ok(result) => result,
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        },
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            Ok(())
        }
    };

    db_pool.close().await;
    tracing::info!("{} shut down", SERVICE_NAME);

    result
}
