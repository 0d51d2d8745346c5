//! Job postings
//!
//! Contractors browse Active jobs; administrators create, edit and delete
//! them. The Awarded transition belongs to bid acceptance, see
//! `services::bids::accept_bid`.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::{
    bid_calculations,
    bids::{self, BidStatus},
    jobs::{self, JobStatus},
    prelude::{BidCalculations, Bids, Jobs},
};
use crate::error::DashboardError;
use crate::models::job::JobRequest;

const MAX_TITLE_LENGTH: usize = 200;
const MAX_LOCATION_LENGTH: usize = 100;
const MAX_SHORT_FIELD_LENGTH: usize = 50;
const DEFAULT_JOB_TYPE: &str = "Construction";

pub async fn get_job(db: &DatabaseConnection, job_id: i32) -> Result<jobs::Model, DashboardError> {
    Jobs::find_by_id(job_id)
        .one(db)
        .await?
        .ok_or_else(|| DashboardError::not_found("Job", job_id))
}

/// Jobs open for bidding, optionally filtered by a case-insensitive term
/// matched against title, description, location, type and materials.
pub async fn list_open_jobs(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<jobs::Model>, DashboardError> {
    let mut query = Jobs::find().filter(jobs::Column::Status.eq(JobStatus::Active));

    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = format!("%{}%", term.to_lowercase());
        let matches = [
            jobs::Column::Title,
            jobs::Column::Description,
            jobs::Column::Location,
            jobs::Column::JobType,
            jobs::Column::RequiredMaterials,
        ]
        .into_iter()
        .fold(Condition::any(), |cond, column| {
            cond.add(Expr::expr(Func::lower(Expr::col(column))).like(pattern.as_str()))
        });
        query = query.filter(matches);
    }

    Ok(query
        .order_by_desc(jobs::Column::PostedAt)
        .order_by_desc(jobs::Column::Id)
        .all(db)
        .await?)
}

/// Every job, newest first
pub async fn list_jobs(db: &DatabaseConnection) -> Result<Vec<jobs::Model>, DashboardError> {
    Ok(Jobs::find()
        .order_by_desc(jobs::Column::PostedAt)
        .order_by_desc(jobs::Column::Id)
        .all(db)
        .await?)
}

pub async fn create_job(
    db: &DatabaseConnection,
    request: JobRequest,
) -> Result<jobs::Model, DashboardError> {
    let fields = validate_job(&request)?;

    let job = jobs::ActiveModel {
        title: Set(fields.title),
        description: Set(fields.description),
        location: Set(fields.location),
        budget_range: Set(fields.budget_range),
        job_type: Set(fields.job_type),
        estimated_hours: Set(request.estimated_hours),
        required_materials: Set(fields.required_materials),
        status: Set(JobStatus::Active),
        revision: Set(0),
        posted_at: Set(Utc::now().into()),
        deadline: Set(request.deadline.map(Into::into)),
        updated_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(job_id = job.id, title = %job.title, "Job posted");
    Ok(job)
}

/// Replace a job's editable fields. A status in the request is applied too.
///
/// Every write bumps `revision`, so a pending acceptance that saw the old
/// row fails with a conflict.
pub async fn update_job(
    db: &DatabaseConnection,
    job_id: i32,
    request: JobRequest,
) -> Result<jobs::Model, DashboardError> {
    let fields = validate_job(&request)?;
    let status = request
        .status
        .as_deref()
        .map(parse_job_status)
        .transpose()?;
    let existing = get_job(db, job_id).await?;
    let current = existing.status;
    let next = status.unwrap_or(current);
    check_status_change(current, next)?;
    let revision = existing.revision;

    let mut active: jobs::ActiveModel = existing.into();
    active.title = Set(fields.title);
    active.description = Set(fields.description);
    active.location = Set(fields.location);
    active.budget_range = Set(fields.budget_range);
    active.job_type = Set(fields.job_type);
    active.estimated_hours = Set(request.estimated_hours);
    active.required_materials = Set(fields.required_materials);
    active.deadline = Set(request.deadline.map(Into::into));
    active.status = Set(next);
    active.revision = Set(revision + 1);
    active.updated_at = Set(Some(Utc::now().into()));

    let job = write_job(db, job_id, active, current, next).await?;
    info!(job_id, status = %job.status, "Job updated");
    Ok(job)
}

/// Administrative status change.
///
/// Awarded is only reachable by accepting a bid. Moving a job back to
/// Active re-opens it: its Accepted bid returns to UnderReview in the same
/// transaction.
pub async fn set_job_status(
    db: &DatabaseConnection,
    job_id: i32,
    status: JobStatus,
) -> Result<jobs::Model, DashboardError> {
    let existing = get_job(db, job_id).await?;
    let current = existing.status;
    check_status_change(current, status)?;
    let revision = existing.revision;

    let mut active: jobs::ActiveModel = existing.into();
    active.status = Set(status);
    active.revision = Set(revision + 1);
    active.updated_at = Set(Some(Utc::now().into()));

    let job = write_job(db, job_id, active, current, status).await?;
    info!(job_id, from = %current, to = %status, "Job status changed");
    Ok(job)
}

fn check_status_change(current: JobStatus, next: JobStatus) -> Result<(), DashboardError> {
    if next == JobStatus::Awarded && current != JobStatus::Awarded {
        return Err(DashboardError::Validation(
            "Jobs are awarded by accepting a bid, use the accept action".to_string(),
        ));
    }
    Ok(())
}

async fn write_job(
    db: &DatabaseConnection,
    job_id: i32,
    active: jobs::ActiveModel,
    current: JobStatus,
    next: JobStatus,
) -> Result<jobs::Model, DashboardError> {
    let txn = db.begin().await?;

    if next == JobStatus::Active && current != JobStatus::Active {
        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
        let demoted = Bids::update_many()
            .col_expr(bids::Column::Status, Expr::value(BidStatus::UnderReview))
            .col_expr(bids::Column::UpdatedAt, Expr::value(now))
            .filter(bids::Column::JobId.eq(job_id))
            .filter(bids::Column::Status.eq(BidStatus::Accepted))
            .exec(&txn)
            .await?
            .rows_affected;
        if demoted > 0 {
            info!(job_id, demoted, "Job re-opened, accepted bid returned to review");
        }
    }

    let job = active.update(&txn).await?;
    txn.commit().await?;
    Ok(job)
}

/// Delete a job along with its bids and their calculation records
pub async fn delete_job(db: &DatabaseConnection, job_id: i32) -> Result<(), DashboardError> {
    let txn = db.begin().await?;

    let bid_ids: Vec<i32> = Bids::find()
        .filter(bids::Column::JobId.eq(job_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|bid| bid.id)
        .collect();

    if !bid_ids.is_empty() {
        BidCalculations::delete_many()
            .filter(bid_calculations::Column::BidId.is_in(bid_ids.clone()))
            .exec(&txn)
            .await?;
        Bids::delete_many()
            .filter(bids::Column::JobId.eq(job_id))
            .exec(&txn)
            .await?;
    }

    let deleted = Jobs::delete_by_id(job_id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        return Err(DashboardError::not_found("Job", job_id));
    }

    txn.commit().await?;
    info!(job_id, bids_removed = bid_ids.len(), "Job deleted");
    Ok(())
}

pub fn parse_job_status(value: &str) -> Result<JobStatus, DashboardError> {
    value.parse::<JobStatus>().map_err(DashboardError::Validation)
}

struct JobFields {
    title: String,
    description: String,
    location: String,
    budget_range: String,
    job_type: String,
    required_materials: Option<String>,
}

fn validate_job(request: &JobRequest) -> Result<JobFields, DashboardError> {
    let title = required(&request.title, "Title", MAX_TITLE_LENGTH)?;
    let description = required(&request.description, "Description", usize::MAX)?;
    let location = required(&request.location, "Location", MAX_LOCATION_LENGTH)?;

    let budget_range = request.budget_range.as_deref().unwrap_or("").trim().to_string();
    if budget_range.len() > MAX_SHORT_FIELD_LENGTH {
        return Err(DashboardError::Validation(format!(
            "Budget range cannot exceed {} characters",
            MAX_SHORT_FIELD_LENGTH
        )));
    }

    let job_type = request
        .job_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_JOB_TYPE)
        .to_string();
    if job_type.len() > MAX_SHORT_FIELD_LENGTH {
        return Err(DashboardError::Validation(format!(
            "Job type cannot exceed {} characters",
            MAX_SHORT_FIELD_LENGTH
        )));
    }

    if let Some(hours) = request.estimated_hours {
        if hours < Decimal::ZERO {
            return Err(DashboardError::Validation(
                "Estimated hours cannot be negative".to_string(),
            ));
        }
    }

    let required_materials = request
        .required_materials
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    Ok(JobFields {
        title,
        description,
        location,
        budget_range,
        job_type,
        required_materials,
    })
}

fn required(value: &str, field: &str, max_len: usize) -> Result<String, DashboardError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DashboardError::Validation(format!("{} is required", field)));
    }
    if value.len() > max_len {
        return Err(DashboardError::Validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> JobRequest {
        JobRequest {
            title: "  Kitchen remodel ".to_string(),
            description: "Replace cabinets and counters".to_string(),
            location: "Springfield".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_job_defaults() {
        let fields = validate_job(&request()).unwrap();
        assert_eq!(fields.title, "Kitchen remodel");
        assert_eq!(fields.job_type, "Construction");
        assert_eq!(fields.budget_range, "");
        assert_eq!(fields.required_materials, None);
    }

    #[test]
    fn test_validate_job_rejects_missing_fields() {
        let mut req = request();
        req.title = "   ".to_string();
        assert_eq!(
            validate_job(&req).err(),
            Some(DashboardError::Validation("Title is required".to_string()))
        );

        let mut req = request();
        req.location = "x".repeat(101);
        assert!(validate_job(&req).is_err());

        let mut req = request();
        req.estimated_hours = Some(dec!(-1));
        assert!(validate_job(&req).is_err());
    }

    #[test]
    fn test_awarded_only_through_acceptance() {
        assert!(matches!(
            check_status_change(JobStatus::Active, JobStatus::Awarded),
            Err(DashboardError::Validation(_))
        ));
        assert!(check_status_change(JobStatus::Awarded, JobStatus::Awarded).is_ok());
        assert!(check_status_change(JobStatus::Awarded, JobStatus::Active).is_ok());
        assert!(check_status_change(JobStatus::Awarded, JobStatus::InProgress).is_ok());
    }

    #[test]
    fn test_parse_job_status() {
        assert_eq!(parse_job_status("Open").unwrap(), JobStatus::Active);
        assert_eq!(parse_job_status("awarded").unwrap(), JobStatus::Awarded);
        assert_eq!(parse_job_status("InProgress").unwrap(), JobStatus::InProgress);
        assert!(parse_job_status("archived").is_err());
    }
}
