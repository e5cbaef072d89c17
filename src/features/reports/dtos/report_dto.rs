use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{Report, ReportSeverity, ReportStatus, WasteType};

/// Public fields of the account that filed a report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportOwnerDto {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

/// Response DTO for report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub user: ReportOwnerDto,
    pub description: Option<String>,
    pub severity: ReportSeverity,
    pub location_lat: f64,
    pub location_lng: f64,
    pub address: Option<String>,
    /// Time-limited URL of the uploaded image
    pub image: String,
    pub status: ReportStatus,
    pub waste_type: WasteType,
    pub confidence: f64,
    pub is_verified_garbage: bool,
    pub is_verified_food: bool,
    pub preparation_time: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
}

impl ReportResponseDto {
    pub fn from_report(report: Report, image_url: String) -> Self {
        Self {
            id: report.id,
            user: ReportOwnerDto {
                id: report.user_id,
                username: report.username,
                email: report.email,
            },
            description: report.description,
            severity: report.severity,
            location_lat: report.location_lat,
            location_lng: report.location_lng,
            address: report.address,
            image: image_url,
            status: report.status,
            waste_type: report.waste_type,
            confidence: report.confidence,
            is_verified_garbage: report.is_verified_garbage,
            is_verified_food: report.is_verified_food,
            preparation_time: report.preparation_time,
            uploaded_at: report.uploaded_at,
        }
    }
}

/// Request DTO for a staff status change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    /// One of `pending`, `in_progress`, `resolved`, `rejected`
    #[schema(example = "in_progress")]
    pub status: Option<String>,
}

/// Multipart body of the report submission endpoints
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadReportDto {
    /// JPEG or PNG, at most 20MB
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub description: Option<String>,
    /// `low`, `medium` (default), `high` or `critical`
    pub severity: Option<ReportSeverity>,
    pub location_lat: f64,
    pub location_lng: f64,
    pub address: Option<String>,
    /// Food waste only, RFC 3339
    pub preparation_time: Option<DateTime<Utc>>,
}
