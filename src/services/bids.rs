//! Bid submission, review and the acceptance transition
//!
//! Invariants kept here:
//! - one bid per (contractor, job), enforced up front and by the unique
//!   index `idx_bids_contractor_job_unique`
//! - at most one Accepted bid per job, and a job with an Accepted bid is
//!   Awarded
//!
//! Acceptance rewrites the whole job (siblings, target, job row) inside one
//! transaction. The job row is claimed with a compare-and-swap on
//! `jobs.revision`, so of two acceptances that saw the same revision only
//! the first commits; the other gets `DashboardError::Conflict`.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::entities::{
    bid_calculations,
    bids::{self, BidStatus},
    contractors,
    jobs::{self, JobStatus},
    prelude::{BidCalculations, Bids, Contractors, Jobs},
};
use crate::error::{is_unique_violation, DashboardError};
use crate::models::bid::{
    AcceptedBid, BidDetails, BidQuote, BidSummary, ContractorBid, PricingInput, SubmitBidRequest,
};
use crate::services::contractor_settings::rate_settings;
use crate::services::contractors::get_contractor;
use crate::services::jobs::get_job;
use crate::services::pricing::{self, BidCalculation, ContractorRateSettings, JobCostInputs};

/// Largest amount a bid may carry
const MAX_BID_AMOUNT: i64 = 1_000_000;

const MAX_NOTES_LENGTH: usize = 2000;

/// Price a bid for preview without persisting anything
pub async fn quote_bid(
    db: &DatabaseConnection,
    contractor_id: i32,
    job_id: Option<i32>,
    raw: &PricingInput,
) -> Result<BidQuote, DashboardError> {
    let settings = rate_settings(db, contractor_id).await?;
    let estimated_hours = match job_id {
        Some(id) => get_job(db, id).await?.estimated_hours,
        None => None,
    };

    let (inputs, rates) = pricing::resolve_inputs(raw, &settings, estimated_hours);
    let breakdown = pricing::compute_bid(&inputs, &rates).rounded();

    Ok(BidQuote {
        inputs,
        rates,
        breakdown,
    })
}

/// Submit a contractor's bid on a job.
///
/// When pricing inputs are supplied the computed breakdown is stored with
/// the bid, and its total is used as the amount unless the contractor
/// overrode it.
pub async fn submit_bid(
    db: &DatabaseConnection,
    contractor_id: i32,
    job_id: i32,
    request: SubmitBidRequest,
) -> Result<bids::Model, DashboardError> {
    get_contractor(db, contractor_id).await?;
    let job = get_job(db, job_id).await?;

    if find_bid_for(db, contractor_id, job_id).await?.is_some() {
        warn!(contractor_id, job_id, "Duplicate bid rejected");
        return Err(DashboardError::DuplicateBid {
            contractor_id,
            job_id,
        });
    }

    if !job.status.accepts_bids() {
        return Err(DashboardError::Validation(format!(
            "Job {} is {} and no longer accepting bids",
            job_id, job.status
        )));
    }

    let priced = match &request.pricing {
        Some(raw) => {
            let settings = rate_settings(db, contractor_id).await?;
            let (inputs, rates) = pricing::resolve_inputs(raw, &settings, job.estimated_hours);
            let breakdown = pricing::compute_bid(&inputs, &rates).rounded();
            Some((inputs, rates, breakdown))
        }
        None => None,
    };

    let amount = request
        .amount
        .or_else(|| priced.as_ref().map(|(_, _, breakdown)| breakdown.total_bid))
        .ok_or_else(|| DashboardError::Validation("Bid amount is required".to_string()))?;
    let amount = validate_amount(amount)?;
    let notes = validate_notes(request.notes)?;

    let now = Utc::now();
    let txn = db.begin().await?;

    let bid = bids::ActiveModel {
        contractor_id: Set(contractor_id),
        job_id: Set(job_id),
        amount: Set(amount),
        notes: Set(notes),
        status: Set(BidStatus::Submitted),
        submitted_at: Set(now.into()),
        updated_at: Set(Some(now.into())),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DashboardError::DuplicateBid {
                contractor_id,
                job_id,
            }
        } else {
            e.into()
        }
    })?;

    if let Some((inputs, rates, breakdown)) = priced {
        record_calculation(&txn, bid.id, &inputs, &rates, &breakdown).await?;
    }

    txn.commit().await?;

    info!(
        bid_id = bid.id,
        contractor_id,
        job_id,
        amount = %bid.amount,
        "Bid submitted"
    );
    Ok(bid)
}

/// Accept a bid: reject its siblings, accept it, award the job.
///
/// Re-accepting an already Accepted bid re-confirms the same end state.
pub async fn accept_bid(
    db: &DatabaseConnection,
    bid_id: i32,
) -> Result<AcceptedBid, DashboardError> {
    let bid = get_bid(db, bid_id).await?;
    let job = get_job(db, bid.job_id).await?;
    accept_at_revision(db, bid, job.revision).await
}

/// Accept a bid only if its job is still at `expected_revision`, the
/// revision the caller saw when it decided to accept.
pub async fn accept_bid_at(
    db: &DatabaseConnection,
    bid_id: i32,
    expected_revision: i32,
) -> Result<AcceptedBid, DashboardError> {
    let bid = get_bid(db, bid_id).await?;
    accept_at_revision(db, bid, expected_revision).await
}

async fn accept_at_revision(
    db: &DatabaseConnection,
    bid: bids::Model,
    expected_revision: i32,
) -> Result<AcceptedBid, DashboardError> {
    let bid_id = bid.id;
    let job_id = bid.job_id;
    let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();

    // Dropping `txn` on any early return rolls everything back
    let txn = db.begin().await?;

    let claimed = Jobs::update_many()
        .col_expr(jobs::Column::Status, Expr::value(JobStatus::Awarded))
        .col_expr(
            jobs::Column::Revision,
            Expr::col(jobs::Column::Revision).add(1),
        )
        .col_expr(jobs::Column::UpdatedAt, Expr::value(now))
        .filter(jobs::Column::Id.eq(job_id))
        .filter(jobs::Column::Revision.eq(expected_revision))
        .exec(&txn)
        .await?;

    if claimed.rows_affected == 0 {
        txn.rollback().await?;
        return match Jobs::find_by_id(job_id).one(db).await? {
            None => Err(DashboardError::not_found("Job", job_id)),
            Some(job) => {
                warn!(
                    bid_id,
                    job_id,
                    expected_revision,
                    current_revision = job.revision,
                    "Bid acceptance lost a concurrent update"
                );
                Err(DashboardError::Conflict(format!(
                    "Job {} was modified by another acceptance, reload and retry",
                    job_id
                )))
            }
        };
    }

    let rejected_count = Bids::update_many()
        .col_expr(bids::Column::Status, Expr::value(BidStatus::Rejected))
        .col_expr(bids::Column::UpdatedAt, Expr::value(now))
        .filter(bids::Column::JobId.eq(job_id))
        .filter(bids::Column::Id.ne(bid_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let accepted_count = Bids::update_many()
        .col_expr(bids::Column::Status, Expr::value(BidStatus::Accepted))
        .col_expr(bids::Column::UpdatedAt, Expr::value(now))
        .filter(bids::Column::Id.eq(bid_id))
        .exec(&txn)
        .await?
        .rows_affected;
    if accepted_count == 0 {
        return Err(DashboardError::not_found("Bid", bid_id));
    }

    let job = Jobs::find_by_id(job_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DashboardError::not_found("Job", job_id))?;
    let accepted = Bids::find_by_id(bid_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DashboardError::not_found("Bid", bid_id))?;
    let rejected = Bids::find()
        .filter(bids::Column::JobId.eq(job_id))
        .filter(bids::Column::Id.ne(bid_id))
        .order_by_asc(bids::Column::Id)
        .all(&txn)
        .await?;

    txn.commit().await?;

    info!(
        bid_id,
        job_id,
        rejected = rejected_count,
        revision = job.revision,
        "Bid accepted, job awarded"
    );

    Ok(AcceptedBid {
        accepted,
        rejected,
        job,
    })
}

/// Reject a single bid. Siblings are left alone; rejecting the accepted
/// bid re-opens its job.
pub async fn reject_bid(
    db: &DatabaseConnection,
    bid_id: i32,
) -> Result<bids::Model, DashboardError> {
    update_status(db, bid_id, BidStatus::Rejected).await
}

/// Administrative status edit of a single bid.
///
/// Accepted and Rejected bids may be moved back to any other state; taking
/// a bid out of Accepted re-opens its Awarded job. Accepting goes through
/// `accept_bid` so the job is awarded with it.
pub async fn set_bid_status(
    db: &DatabaseConnection,
    bid_id: i32,
    status: BidStatus,
) -> Result<bids::Model, DashboardError> {
    if status == BidStatus::Accepted {
        return Err(DashboardError::Validation(
            "Use the accept action to accept a bid".to_string(),
        ));
    }
    update_status(db, bid_id, status).await
}

async fn update_status(
    db: &DatabaseConnection,
    bid_id: i32,
    status: BidStatus,
) -> Result<bids::Model, DashboardError> {
    let bid = get_bid(db, bid_id).await?;
    let previous = bid.status;
    let job_id = bid.job_id;
    let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();

    let txn = db.begin().await?;

    let mut active: bids::ActiveModel = bid.into();
    active.status = Set(status);
    active.updated_at = Set(Some(now));
    let bid = active.update(&txn).await?;

    // Withdrawing the award re-opens the job
    if previous == BidStatus::Accepted && status != BidStatus::Accepted {
        let reopened = Jobs::update_many()
            .col_expr(jobs::Column::Status, Expr::value(JobStatus::Active))
            .col_expr(
                jobs::Column::Revision,
                Expr::col(jobs::Column::Revision).add(1),
            )
            .col_expr(jobs::Column::UpdatedAt, Expr::value(now))
            .filter(jobs::Column::Id.eq(job_id))
            .filter(jobs::Column::Status.eq(JobStatus::Awarded))
            .exec(&txn)
            .await?
            .rows_affected;
        if reopened > 0 {
            info!(bid_id, job_id, "Award withdrawn, job re-opened");
        }
    }

    txn.commit().await?;

    info!(bid_id, from = %previous, to = %status, "Bid status updated");
    Ok(bid)
}

/// Delete a bid and its calculation record
pub async fn delete_bid(db: &DatabaseConnection, bid_id: i32) -> Result<(), DashboardError> {
    let txn = db.begin().await?;

    BidCalculations::delete_many()
        .filter(bid_calculations::Column::BidId.eq(bid_id))
        .exec(&txn)
        .await?;

    let deleted = Bids::delete_by_id(bid_id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        return Err(DashboardError::not_found("Bid", bid_id));
    }

    txn.commit().await?;
    info!(bid_id, "Bid deleted");
    Ok(())
}

pub async fn get_bid(db: &DatabaseConnection, bid_id: i32) -> Result<bids::Model, DashboardError> {
    Bids::find_by_id(bid_id)
        .one(db)
        .await?
        .ok_or_else(|| DashboardError::not_found("Bid", bid_id))
}

pub async fn get_bid_with_calculation(
    db: &DatabaseConnection,
    bid_id: i32,
) -> Result<BidDetails, DashboardError> {
    let (bid, calculation) = Bids::find_by_id(bid_id)
        .find_also_related(BidCalculations)
        .one(db)
        .await?
        .ok_or_else(|| DashboardError::not_found("Bid", bid_id))?;

    Ok(BidDetails { bid, calculation })
}

/// All bids with their job title and contractor company, newest first
pub async fn list_bids(db: &DatabaseConnection) -> Result<Vec<BidSummary>, DashboardError> {
    let rows = Bids::find()
        .find_also_related(Jobs)
        .order_by_desc(bids::Column::SubmittedAt)
        .order_by_desc(bids::Column::Id)
        .all(db)
        .await?;

    let contractor_ids: Vec<i32> = rows.iter().map(|(bid, _)| bid.contractor_id).collect();
    let companies: HashMap<i32, String> = Contractors::find()
        .filter(contractors::Column::Id.is_in(contractor_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.company_name))
        .collect();

    debug!(count = rows.len(), "Listed bids");

    Ok(rows
        .into_iter()
        .map(|(bid, job)| BidSummary {
            company_name: companies.get(&bid.contractor_id).cloned(),
            job_title: job.map(|j| j.title),
            bid,
        })
        .collect())
}

/// A contractor's own bids with the jobs they were placed on
pub async fn list_contractor_bids(
    db: &DatabaseConnection,
    contractor_id: i32,
) -> Result<Vec<ContractorBid>, DashboardError> {
    get_contractor(db, contractor_id).await?;

    let rows = Bids::find()
        .filter(bids::Column::ContractorId.eq(contractor_id))
        .find_also_related(Jobs)
        .order_by_desc(bids::Column::SubmittedAt)
        .order_by_desc(bids::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(bid, job)| ContractorBid { bid, job })
        .collect())
}

pub fn parse_bid_status(value: &str) -> Result<BidStatus, DashboardError> {
    value.parse::<BidStatus>().map_err(DashboardError::Validation)
}

async fn find_bid_for(
    db: &DatabaseConnection,
    contractor_id: i32,
    job_id: i32,
) -> Result<Option<bids::Model>, DashboardError> {
    Ok(Bids::find()
        .filter(bids::Column::ContractorId.eq(contractor_id))
        .filter(bids::Column::JobId.eq(job_id))
        .one(db)
        .await?)
}

async fn record_calculation(
    txn: &DatabaseTransaction,
    bid_id: i32,
    inputs: &JobCostInputs,
    rates: &ContractorRateSettings,
    breakdown: &BidCalculation,
) -> Result<bid_calculations::Model, DashboardError> {
    let record = bid_calculations::ActiveModel {
        bid_id: Set(bid_id),
        labor_hours: Set(pricing::round_currency(inputs.labor_hours)),
        material_cost: Set(pricing::round_currency(inputs.material_cost)),
        labor_rate: Set(pricing::round_currency(rates.labor_rate)),
        material_margin_pct: Set(pricing::round_currency(pricing::clamp_percentage(
            rates.material_margin_pct,
        ))),
        profit_margin_pct: Set(pricing::round_currency(pricing::clamp_percentage(
            rates.profit_margin_pct,
        ))),
        labor_cost: Set(breakdown.labor_cost),
        material_margin_amount: Set(breakdown.material_margin_amount),
        material_total: Set(breakdown.material_total),
        travel_cost: Set(breakdown.travel_cost),
        subtotal: Set(breakdown.subtotal),
        profit_amount: Set(breakdown.profit_amount),
        total_bid: Set(breakdown.total_bid),
        calculated_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    debug!(bid_id, total = %breakdown.total_bid, "Bid calculation recorded");
    Ok(record)
}

fn validate_amount(amount: Decimal) -> Result<Decimal, DashboardError> {
    if amount < Decimal::ZERO {
        return Err(DashboardError::Validation(
            "Bid amount cannot be negative".to_string(),
        ));
    }
    if amount > Decimal::from(MAX_BID_AMOUNT) {
        return Err(DashboardError::Validation(format!(
            "Bid amount cannot exceed {}",
            MAX_BID_AMOUNT
        )));
    }
    Ok(pricing::round_currency(amount))
}

fn validate_notes(notes: Option<String>) -> Result<Option<String>, DashboardError> {
    let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    if let Some(text) = &notes {
        if text.chars().count() > MAX_NOTES_LENGTH {
            return Err(DashboardError::Validation(format!(
                "Notes cannot exceed {} characters",
                MAX_NOTES_LENGTH
            )));
        }
    }
    Ok(notes)
}
