use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppMultipart};
use crate::features::auth::guards::RequireStaff;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    ReportForm, ReportResponseDto, UpdateReportStatusDto, UploadReportDto,
};
use crate::features::reports::models::WasteType;
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a general waste report
#[utoipa::path(
    post,
    path = "/api/reports/create",
    request_body(content = UploadReportDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid image or metadata"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Image storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let submission = ReportForm::read(&mut multipart)
        .await?
        .validate(WasteType::General)?;
    let report = service.submit_general(&user, submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report), None, None)),
    ))
}

/// Submit a food waste report
#[utoipa::path(
    post,
    path = "/api/reports/foodwaste/create",
    request_body(content = UploadReportDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid image or metadata"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Image storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_food_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let submission = ReportForm::read(&mut multipart)
        .await?
        .validate(WasteType::FoodWaste)?;
    let report = service.submit_food(&user, submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report), None, None)),
    ))
}

/// List every report (staff only)
#[utoipa::path(
    get,
    path = "/api/staff/reports",
    responses(
        (status = 200, description = "All reports, newest first", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "staff"
)]
pub async fn list_reports(
    RequireStaff(_staff): RequireStaff,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_all().await?;
    let total = reports.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Get a report by ID (staff only)
#[utoipa::path(
    get,
    path = "/api/staff/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "staff"
)]
pub async fn get_report(
    RequireStaff(_staff): RequireStaff,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Change a report's status (staff only)
#[utoipa::path(
    patch,
    path = "/api/staff/reports/{id}/update",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid status provided"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "staff"
)]
pub async fn update_report_status(
    RequireStaff(staff): RequireStaff,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.update_status(id, dto.status.as_deref()).await?;
    tracing::info!("Staff user {} set report {} to {}", staff.user_id, id, report.status);
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}
