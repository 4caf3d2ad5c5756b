use api::auth::generate_jwt;
use api::auth::middleware::log_request;
use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use db::connect;
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::config::{AppConfig, LogSettings};

#[tokio::main]
async fn main() {
    // Subscriber before AppConfig: loading it may warn about bad values.
    let log = LogSettings::from_env();
    let _log_guard = init_logging(&log.file, &log.level, log.to_stdout);
    let config = AppConfig::global().clone();

    // `api issue-token <user-id>` prints an admin bearer token and exits.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("issue-token") {
        issue_token(args.get(2).map(String::as_str));
        return;
    }

    let db = connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let app_state = AppState::from_config(db).expect("Invalid application configuration");

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!(
        "Starting {} on http://{}:{} (check-in origin {})",
        config.project_name,
        config.host,
        config.port,
        config.public_origin
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn issue_token(user_id: Option<&str>) {
    let user_id = match user_id.map(str::parse::<i64>) {
        Some(Ok(id)) => id,
        _ => {
            eprintln!("usage: api issue-token <user-id>");
            std::process::exit(2);
        }
    };

    match generate_jwt(user_id, true) {
        Ok((token, expires_at)) => {
            println!("{token}");
            eprintln!("expires at {expires_at}");
        }
        Err(e) => {
            eprintln!("Failed to sign token: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(
    log_file: &str,
    log_level: &str,
    log_to_stdout: bool,
) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
