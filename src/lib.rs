// src/lib.rs

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub admin_api_key: Option<String>,
}

pub mod entities {
    pub mod prelude;
    pub mod contractors;
    pub mod contractor_settings;
    pub mod jobs;
    pub mod bids;
    pub mod bid_calculations;
}

pub mod services {
    pub mod pricing;
    pub mod contractors;
    pub mod contractor_settings;
    pub mod jobs;
    pub mod bids;
}

pub mod config;
pub mod error;
pub mod models;
pub mod handlers;
pub mod routes;
