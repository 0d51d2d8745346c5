use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{bids, contractors, health, jobs, settings};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let contractor_routes = Router::new()
        .route("/api/bids/quote", post(bids::quote_bid))
        .route("/api/jobs", get(jobs::list_open_jobs))
        .route("/api/jobs/{job_id}", get(jobs::get_job))
        .route("/api/jobs/{job_id}/bids", post(bids::submit_bid))
        .route("/api/contractor/bids", get(bids::list_my_bids))
        .route(
            "/api/contractor/settings",
            get(settings::get_settings).put(settings::update_settings),
        );

    let admin_routes = Router::new()
        .route("/api/admin/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/api/admin/jobs/{job_id}",
            put(jobs::update_job).delete(jobs::delete_job),
        )
        .route("/api/admin/jobs/{job_id}/status", put(jobs::set_job_status))
        .route("/api/admin/contractors", post(contractors::create_contractor))
        .route("/api/admin/bids", get(bids::list_bids))
        .route(
            "/api/admin/bids/{bid_id}",
            get(bids::get_bid).delete(bids::delete_bid),
        )
        .route("/api/admin/bids/{bid_id}/accept", post(bids::accept_bid))
        .route("/api/admin/bids/{bid_id}/reject", post(bids::reject_bid))
        .route("/api/admin/bids/{bid_id}/status", put(bids::set_bid_status));

    Router::new()
        .route("/health", get(health::health))
        .merge(contractor_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
