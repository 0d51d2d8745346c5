#![allow(dead_code)]

use contractor_dashboard_backend::entities::{bids, contractors, jobs};
use contractor_dashboard_backend::models::bid::SubmitBidRequest;
use contractor_dashboard_backend::models::contractor::CreateContractorRequest;
use contractor_dashboard_backend::models::job::JobRequest;
use contractor_dashboard_backend::services::{
    bids as bid_service, contractors as contractor_service, jobs as job_service,
};
use contractor_dashboard_backend::AppState;
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database; concurrent transactions queue on it.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn test_state() -> AppState {
    AppState {
        db: setup_test_db().await.expect("Failed to set up test DB"),
        admin_api_key: Some(ADMIN_KEY.to_string()),
    }
}

pub async fn seed_contractor(db: &DatabaseConnection, company: &str) -> contractors::Model {
    contractor_service::create_contractor(
        db,
        CreateContractorRequest {
            email: format!("{}@example.com", company.to_lowercase().replace(' ', ".")),
            company_name: company.to_string(),
            phone: None,
        },
    )
    .await
    .expect("Failed to seed contractor")
}

pub fn job_request(title: &str) -> JobRequest {
    JobRequest {
        title: title.to_string(),
        description: format!("{} for a two storey house", title),
        location: "Springfield".to_string(),
        budget_range: Some("$1,000 - $5,000".to_string()),
        job_type: Some("Renovation".to_string()),
        estimated_hours: Some(Decimal::new(10, 0)),
        required_materials: Some("Drywall, paint".to_string()),
        ..Default::default()
    }
}

pub async fn seed_job(db: &DatabaseConnection, title: &str) -> jobs::Model {
    job_service::create_job(db, job_request(title))
        .await
        .expect("Failed to seed job")
}

pub async fn seed_bid(
    db: &DatabaseConnection,
    contractor_id: i32,
    job_id: i32,
    amount: i64,
) -> bids::Model {
    bid_service::submit_bid(
        db,
        contractor_id,
        job_id,
        SubmitBidRequest {
            amount: Some(Decimal::new(amount, 0)),
            notes: None,
            pricing: None,
        },
    )
    .await
    .expect("Failed to seed bid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database setup should succeed");
    }
}
