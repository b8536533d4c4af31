use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod constants;
pub mod database;
pub mod models;
pub mod session;
pub mod storage;
pub mod utils;
pub mod verification;

use auth::AuthClient;
use database::AppDatabase;
use storage::LocalStorage;

/// Everything a screen needs to talk to the outside world. Built once at
/// app start and handed to the UI event handlers.
pub struct AppContext {
    pub db: Arc<AppDatabase>,
    pub storage: Arc<LocalStorage>,
    pub auth: Arc<AuthClient>,
}

/// Bootstrap the booking core: load .env, initialize logging, and connect
/// the external collaborators.
pub async fn init_app() -> anyhow::Result<AppContext> {
    // import .env file
    dotenv().ok();
    initialize_logging();
    // create database client
    let db = AppDatabase::new().await?;
    let context = AppContext {
        db: Arc::new(db),
        storage: Arc::new(LocalStorage::new()),
        auth: Arc::new(AuthClient::new()),
    };
    tracing::debug!("Booking core initialized");
    Ok(context)
}

fn initialize_logging() {
    // create default env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or("dinetime_booking_rust=debug".into());

    // initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
