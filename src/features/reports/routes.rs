use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Headroom for the non-file parts of a submission
const FORM_OVERHEAD: usize = 1024 * 1024;

/// Submission and staff portal routes (auth middleware applied by caller)
pub fn routes(report_service: Arc<ReportService>) -> Router {
    let submissions = Router::new()
        .route("/api/reports/create", post(handlers::create_report))
        .route(
            "/api/reports/foodwaste/create",
            post(handlers::create_food_report),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + FORM_OVERHEAD));

    let staff = Router::new()
        .route("/api/staff/reports", get(handlers::list_reports))
        .route("/api/staff/reports/{id}", get(handlers::get_report))
        .route(
            "/api/staff/reports/{id}/update",
            put(handlers::update_report_status).patch(handlers::update_report_status),
        );

    submissions.merge(staff).with_state(report_service)
}
