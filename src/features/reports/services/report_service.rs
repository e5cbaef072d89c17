use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::core::config::NotificationConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{ReportResponseDto, ReportSubmission};
use crate::features::reports::models::{NewReport, Report, ReportStatus, WasteType};
use crate::features::reports::repositories::ReportRepository;
use crate::modules::mail::{Notifier, OutgoingEmail};
use crate::modules::storage::{image_key, ObjectStorage};
use crate::modules::vision::LabelDetector;
use crate::shared::constants::{
    AUTHORITY_CONFIDENCE_THRESHOLD, FOOD_FRESHNESS_HOURS, FOOD_LABELS, GARBAGE_LABELS,
};
use crate::shared::templates;

/// Whether food prepared at `prepared_at` is still fresh at `now`
pub fn is_fresh(prepared_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - prepared_at < Duration::hours(FOOD_FRESHNESS_HOURS)
}

/// Report intake (store, persist, verify, notify) and staff review
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    storage: Arc<dyn ObjectStorage>,
    labeler: Arc<dyn LabelDetector>,
    notifier: Option<Arc<dyn Notifier>>,
    notifications: NotificationConfig,
    image_prefix: String,
}

impl ReportService {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        storage: Arc<dyn ObjectStorage>,
        labeler: Arc<dyn LabelDetector>,
        notifier: Option<Arc<dyn Notifier>>,
        notifications: NotificationConfig,
        image_prefix: String,
    ) -> Self {
        Self {
            repository,
            storage,
            labeler,
            notifier,
            notifications,
            image_prefix,
        }
    }

    /// General waste: always verified against the garbage vocabulary
    pub async fn submit_general(
        &self,
        user: &AuthenticatedUser,
        submission: ReportSubmission,
    ) -> Result<ReportResponseDto> {
        let image = submission.image.bytes.clone();
        let report = self.persist(user, submission, WasteType::General).await?;

        let verdict = self.labeler.detect(&image, GARBAGE_LABELS).await;
        let report = self
            .repository
            .record_verification(report.id, WasteType::General, verdict)
            .await?;

        tracing::info!(
            "Report {} verification: garbage={} confidence={:.2}",
            report.id,
            report.is_verified_garbage,
            report.confidence
        );

        if report.is_verified_garbage && report.confidence > AUTHORITY_CONFIDENCE_THRESHOLD {
            self.notify_authority(&report).await;
        }

        Ok(self.to_dto(report).await)
    }

    /// Food waste: verified only when a preparation time was given
    pub async fn submit_food(
        &self,
        user: &AuthenticatedUser,
        submission: ReportSubmission,
    ) -> Result<ReportResponseDto> {
        let image = submission.image.bytes.clone();
        let report = self.persist(user, submission, WasteType::FoodWaste).await?;

        let Some(prepared_at) = report.preparation_time else {
            tracing::debug!("Report {} has no preparation time, skipping verification", report.id);
            return Ok(self.to_dto(report).await);
        };

        let verdict = self.labeler.detect(&image, FOOD_LABELS).await;
        let report = self
            .repository
            .record_verification(report.id, WasteType::FoodWaste, verdict)
            .await?;

        let fresh = is_fresh(prepared_at, Utc::now());
        tracing::info!(
            "Report {} verification: food={} confidence={:.2} fresh={}",
            report.id,
            report.is_verified_food,
            report.confidence,
            fresh
        );

        if report.is_verified_food && fresh {
            self.notify_ngo(&report, prepared_at).await;
        }

        Ok(self.to_dto(report).await)
    }

    pub async fn list_all(&self) -> Result<Vec<ReportResponseDto>> {
        let reports = self.repository.list_all().await?;
        let mut dtos = Vec::with_capacity(reports.len());
        for report in reports {
            dtos.push(self.to_dto(report).await);
        }
        Ok(dtos)
    }

    pub async fn get(&self, id: i64) -> Result<ReportResponseDto> {
        let report = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(self.to_dto(report).await)
    }

    /// Status values outside the known set are rejected after the report is found
    pub async fn update_status(&self, id: i64, status: Option<&str>) -> Result<ReportResponseDto> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        let status = status
            .and_then(|s| s.parse::<ReportStatus>().ok())
            .ok_or_else(|| AppError::Validation("Invalid status provided".to_string()))?;

        let report = self
            .repository
            .update_status(id, status)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(self.to_dto(report).await)
    }

    async fn persist(
        &self,
        user: &AuthenticatedUser,
        submission: ReportSubmission,
        waste_type: WasteType,
    ) -> Result<Report> {
        let key = image_key(
            &self.image_prefix,
            user.user_id,
            &submission.image.content_type,
        );
        self.storage
            .upload(&key, &submission.image.bytes, &submission.image.content_type)
            .await?;

        self.repository
            .insert(&NewReport {
                user_id: user.user_id,
                description: submission.description,
                severity: submission.severity,
                location_lat: submission.location_lat,
                location_lng: submission.location_lng,
                address: submission.address,
                image_key: key,
                waste_type,
                preparation_time: submission.preparation_time,
            })
            .await
    }

    /// A signing failure falls back to the bare object key
    async fn to_dto(&self, report: Report) -> ReportResponseDto {
        let image = match self.storage.presigned_url(&report.image_key).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Failed to sign image link for report {}: {}", report.id, e);
                report.image_key.clone()
            }
        };
        ReportResponseDto::from_report(report, image)
    }

    async fn notify_authority(&self, report: &Report) {
        let Some(to) = self.notifications.authority_email.clone() else {
            tracing::debug!("No authority address configured, report {} not forwarded", report.id);
            return;
        };

        let body = templates::render(
            templates::GARBAGE_ALERT,
            minijinja::context! {
                report_id => report.id,
                lat => report.location_lat,
                lng => report.location_lng,
                severity => report.severity.label(),
                description => description_text(report),
            },
        );

        self.send(
            to,
            format!("High-Confidence Garbage Report Submitted: #{}", report.id),
            body,
        )
        .await;
    }

    async fn notify_ngo(&self, report: &Report, prepared_at: DateTime<Utc>) {
        let Some(to) = self.notifications.ngo_email.clone() else {
            tracing::debug!("No NGO address configured, report {} not forwarded", report.id);
            return;
        };

        let body = templates::render(
            templates::FOOD_ALERT,
            minijinja::context! {
                report_id => report.id,
                prepared_at => prepared_at.format("%Y-%m-%d %H:%M").to_string(),
                lat => report.location_lat,
                lng => report.location_lng,
                description => description_text(report),
            },
        );

        self.send(
            to,
            format!("Fresh, Consumable Food Available: Report #{}", report.id),
            body,
        )
        .await;
    }

    /// Delivery problems are logged; the report stays accepted
    async fn send(
        &self,
        to: String,
        subject: String,
        body: std::result::Result<String, templates::TemplateError>,
    ) {
        let Some(notifier) = &self.notifier else {
            tracing::warn!("SMTP is not configured, dropping notification '{}'", subject);
            return;
        };

        let body = match body {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to render notification '{}': {}", subject, e);
                return;
            }
        };

        if let Err(e) = notifier.send(OutgoingEmail { to, subject, body }).await {
            tracing::warn!("Failed to send notification email: {}", e);
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Report {} not found", id))
}

fn description_text(report: &Report) -> &str {
    report.description.as_deref().unwrap_or("None")
}
