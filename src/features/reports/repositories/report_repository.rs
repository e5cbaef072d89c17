use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report, ReportStatus, WasteType};
use crate::modules::vision::LabelMatch;

/// Report columns selected from `reports r JOIN users u`
const REPORT_COLUMNS: &str = "r.id, r.user_id, u.username, u.email, r.description, r.severity, \
     r.location_lat, r.location_lng, r.address, r.image_key, r.status, r.waste_type, \
     r.confidence, r.is_verified_garbage, r.is_verified_food, r.preparation_time, \
     r.uploaded_at, r.updated_at";

/// Persistence operations for reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: &NewReport) -> Result<Report>;

    /// Store the label-detection verdict in the flag matching `waste_type`
    async fn record_verification(
        &self,
        id: i64,
        waste_type: WasteType,
        verdict: LabelMatch,
    ) -> Result<Report>;

    /// Every report, newest upload first
    async fn list_all(&self) -> Result<Vec<Report>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>>;

    async fn update_status(&self, id: i64, status: ReportStatus) -> Result<Option<Report>>;
}

/// Stores the verdict in the flag column for `waste_type` and refreshes `updated_at`
fn verification_query(waste_type: WasteType) -> String {
    let flag = match waste_type {
        WasteType::General => "is_verified_garbage",
        WasteType::FoodWaste => "is_verified_food",
    };
    format!(
        r#"
        WITH r AS (
            UPDATE reports
            SET {} = $2, confidence = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
        )
        SELECT {} FROM r JOIN users u ON u.id = r.user_id
        "#,
        flag, REPORT_COLUMNS
    )
}

fn status_update_query() -> String {
    format!(
        r#"
        WITH r AS (
            UPDATE reports SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
        )
        SELECT {} FROM r JOIN users u ON u.id = r.user_id
        "#,
        REPORT_COLUMNS
    )
}

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: &NewReport) -> Result<Report> {
        let query = format!(
            r#"
            WITH r AS (
                INSERT INTO reports (
                    user_id, description, severity, location_lat, location_lng,
                    address, image_key, waste_type, preparation_time
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
            )
            SELECT {} FROM r JOIN users u ON u.id = r.user_id
            "#,
            REPORT_COLUMNS
        );

        let created = sqlx::query_as::<_, Report>(&query)
            .bind(report.user_id)
            .bind(&report.description)
            .bind(report.severity)
            .bind(report.location_lat)
            .bind(report.location_lng)
            .bind(&report.address)
            .bind(&report.image_key)
            .bind(report.waste_type)
            .bind(report.preparation_time)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create report: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Created {} report {} for user {}",
            created.waste_type,
            created.id,
            created.user_id
        );
        Ok(created)
    }

    async fn record_verification(
        &self,
        id: i64,
        waste_type: WasteType,
        verdict: LabelMatch,
    ) -> Result<Report> {
        sqlx::query_as::<_, Report>(&verification_query(waste_type))
            .bind(id)
            .bind(verdict.matched)
            .bind(verdict.score)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record verification for report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list_all(&self) -> Result<Vec<Report>> {
        let query = format!(
            "SELECT {} FROM reports r JOIN users u ON u.id = r.user_id \
             ORDER BY r.uploaded_at DESC, r.id DESC",
            REPORT_COLUMNS
        );

        let reports = sqlx::query_as::<_, Report>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(reports)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        let query = format!(
            "SELECT {} FROM reports r JOIN users u ON u.id = r.user_id WHERE r.id = $1",
            REPORT_COLUMNS
        );

        let report = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(report)
    }

    async fn update_status(&self, id: i64, status: ReportStatus) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(&status_update_query())
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update status of report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if report.is_some() {
            tracing::info!("Report {} status set to {}", id, status);
        }
        Ok(report)
    }
}
