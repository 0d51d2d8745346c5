//! Error taxonomy shared by the bid, job and settings services
//!
//! Services return these as values; the HTTP layer turns them into a
//! `{ success: false, error, code }` body. Only `Database` is treated as a
//! server fault.

use sea_orm::{DbErr, SqlErr};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Referenced bid, job or contractor does not exist
    NotFound(String),
    /// The contractor already has a bid on this job
    DuplicateBid { contractor_id: i32, job_id: i32 },
    /// Lost a concurrent write (e.g. two acceptances on the same job)
    Conflict(String),
    Validation(String),
    Database(String),
}

impl DashboardError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        DashboardError::NotFound(format!("{} {} not found", entity, id))
    }

    /// Machine-readable code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::NotFound(_) => "NOT_FOUND",
            DashboardError::DuplicateBid { .. } => "DUPLICATE_BID",
            DashboardError::Conflict(_) => "CONFLICT",
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DashboardError::DuplicateBid {
                contractor_id,
                job_id,
            } => write!(
                f,
                "Contractor {} has already submitted a bid for job {}",
                contractor_id, job_id
            ),
            DashboardError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DashboardError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DashboardError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<DbErr> for DashboardError {
    fn from(err: DbErr) -> Self {
        DashboardError::Database(err.to_string())
    }
}

/// True when the error was raised by a unique index or constraint
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::DuplicateBid {
            contractor_id: 5,
            job_id: 9,
        };
        assert_eq!(
            err.to_string(),
            "Contractor 5 has already submitted a bid for job 9"
        );
        assert_eq!(err.code(), "DUPLICATE_BID");

        let err = DashboardError::not_found("Bid", 3);
        assert!(err.to_string().contains("Bid 3 not found"));
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_db_error_maps_to_database() {
        let err: DashboardError = DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
    }
}
