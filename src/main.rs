use std::sync::Arc;

use axum::http::Method;
use clap::Parser;
use formdrop::config::{Cli, Config};
use formdrop::db::Database;
use formdrop::handler::AppState;
use formdrop::routes;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    tracing_subscriber::fmt().json().init();
    tracing::info!("formdrop.svc starting");

    let mut cfg = Config::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to load config from environment");
        std::process::exit(1);
    });
    if let Some(port) = args.port {
        cfg = cfg.with_port(port);
    }

    let db = Arc::new(Database::new(&cfg).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to connect to store");
        std::process::exit(1);
    }));
    tracing::info!("store connected");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = routes::routes().layer(cors).with_state(AppState { db });

    let address = format!("0.0.0.0:{}", cfg.get_port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("formdrop.svc running on {}", &address);
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "server exited with error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl+c signal received, shutting down");
        }
    }

    tracing::info!("formdrop.svc going off");
}
