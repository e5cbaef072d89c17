use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
            ReportStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ReportStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "in_progress" => Ok(ReportStatus::InProgress),
            "resolved" => Ok(ReportStatus::Resolved),
            "rejected" => Ok(ReportStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Report severity enum matching database enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl ReportSeverity {
    /// Human-readable label used in notification emails
    pub fn label(&self) -> &'static str {
        match self {
            ReportSeverity::Low => "Low",
            ReportSeverity::Medium => "Medium",
            ReportSeverity::High => "High",
            ReportSeverity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportSeverity::Low => write!(f, "low"),
            ReportSeverity::Medium => write!(f, "medium"),
            ReportSeverity::High => write!(f, "high"),
            ReportSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for ReportSeverity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ReportSeverity::Low),
            "medium" => Ok(ReportSeverity::Medium),
            "high" => Ok(ReportSeverity::High),
            "critical" => Ok(ReportSeverity::Critical),
            _ => Err(()),
        }
    }
}

/// Which submission endpoint created the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "waste_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    General,
    FoodWaste,
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WasteType::General => write!(f, "general"),
            WasteType::FoodWaste => write!(f, "food_waste"),
        }
    }
}

/// Database model for report, joined with its owner's public fields
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub description: Option<String>,
    pub severity: ReportSeverity,
    pub location_lat: f64,
    pub location_lng: f64,
    pub address: Option<String>,
    pub image_key: String,
    pub status: ReportStatus,
    pub waste_type: WasteType,
    pub confidence: f64,
    pub is_verified_garbage: bool,
    pub is_verified_food: bool,
    pub preparation_time: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: i64,
    pub description: Option<String>,
    pub severity: ReportSeverity,
    pub location_lat: f64,
    pub location_lng: f64,
    pub address: Option<String>,
    pub image_key: String,
    pub waste_type: WasteType,
    pub preparation_time: Option<DateTime<Utc>>,
}
