//! Multipart form handling for report submissions.
//!
//! [`ReportForm::read`] collects the raw parts, [`ReportForm::validate`]
//! turns them into a typed [`ReportSubmission`] or a field-scoped 400.

use axum::body::Bytes;
use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use crate::core::error::{AppError, FieldError, Result};
use crate::features::reports::models::{ReportSeverity, WasteType};
use crate::shared::constants::{ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE};

pub const IMAGE_REQUIRED: &str = "An image file is required.";
pub const IMAGE_EMPTY: &str = "The uploaded image is empty or invalid.";
pub const IMAGE_TOO_LARGE: &str = "Image file size exceeds 20MB limit.";
pub const IMAGE_UNSUPPORTED: &str = "Only JPEG or PNG images are supported.";

const FIELD_REQUIRED: &str = "This field is required.";
const NUMBER_INVALID: &str = "A valid number is required.";
const MAX_ADDRESS_LENGTH: usize = 255;

/// A file part as received, before validation
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// A validated JPEG/PNG image
#[derive(Debug, Clone)]
pub struct ReportImage {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Raw multipart parts of a submission
#[derive(Debug, Default)]
pub struct ReportForm {
    pub image: Option<UploadedImage>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub location_lat: Option<String>,
    pub location_lng: Option<String>,
    pub address: Option<String>,
    pub preparation_time: Option<String>,
}

/// Typed, validated submission
#[derive(Debug, Clone)]
pub struct ReportSubmission {
    pub image: ReportImage,
    pub description: Option<String>,
    pub severity: ReportSeverity,
    pub location_lat: f64,
    pub location_lng: f64,
    pub address: Option<String>,
    pub preparation_time: Option<DateTime<Utc>>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::field("image", IMAGE_TOO_LARGE)
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

async fn read_text(field: Field<'_>) -> Result<String> {
    field.text().await.map_err(multipart_error)
}

/// Empty form values count as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ReportForm {
    /// Collect the known parts; anything else (`status`, `waste_type`,
    /// `confidence`, `is_verified_*`, ...) is skipped.
    pub async fn read(multipart: &mut Multipart) -> Result<Self> {
        let mut form = ReportForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    form.image = Some(UploadedImage {
                        bytes,
                        content_type,
                    });
                }
                "description" => form.description = Some(read_text(field).await?),
                "severity" => form.severity = Some(read_text(field).await?),
                "location_lat" => form.location_lat = Some(read_text(field).await?),
                "location_lng" => form.location_lng = Some(read_text(field).await?),
                "address" => form.address = Some(read_text(field).await?),
                "preparation_time" => form.preparation_time = Some(read_text(field).await?),
                other => tracing::debug!("Ignoring multipart field '{}'", other),
            }
        }

        Ok(form)
    }

    /// Validate every part, reporting all failing fields at once
    pub fn validate(self, waste_type: WasteType) -> Result<ReportSubmission> {
        let mut errors = Vec::new();

        let image = validate_image(self.image).map_err(|e| errors.push(e)).ok();
        let location_lat = parse_coordinate("location_lat", self.location_lat, 90.0)
            .map_err(|e| errors.push(e))
            .ok();
        let location_lng = parse_coordinate("location_lng", self.location_lng, 180.0)
            .map_err(|e| errors.push(e))
            .ok();

        let severity = match non_empty(self.severity) {
            None => Some(ReportSeverity::default()),
            Some(raw) => match raw.parse::<ReportSeverity>() {
                Ok(severity) => Some(severity),
                Err(()) => {
                    errors.push(FieldError::new(
                        "severity",
                        format!("\"{}\" is not a valid choice.", raw),
                    ));
                    None
                }
            },
        };

        let address = non_empty(self.address);
        if address
            .as_ref()
            .is_some_and(|a| a.chars().count() > MAX_ADDRESS_LENGTH)
        {
            errors.push(FieldError::new(
                "address",
                "Ensure this field has no more than 255 characters.",
            ));
        }

        let preparation_time = match (waste_type, non_empty(self.preparation_time)) {
            (WasteType::FoodWaste, Some(raw)) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(t) => Some(t.with_timezone(&Utc)),
                Err(_) => {
                    errors.push(FieldError::new(
                        "preparation_time",
                        "Datetime has wrong format. Use RFC 3339.",
                    ));
                    None
                }
            },
            _ => None,
        };

        match (image, location_lat, location_lng, severity) {
            (Some(image), Some(location_lat), Some(location_lng), Some(severity))
                if errors.is_empty() =>
            {
                Ok(ReportSubmission {
                    image,
                    description: non_empty(self.description),
                    severity,
                    location_lat,
                    location_lng,
                    address,
                    preparation_time,
                })
            }
            _ => Err(AppError::InvalidFields(errors)),
        }
    }
}

/// Checks run in order: presence, emptiness, size, then content type
pub fn validate_image(image: Option<UploadedImage>) -> std::result::Result<ReportImage, FieldError> {
    let image = image.ok_or_else(|| FieldError::new("image", IMAGE_REQUIRED))?;

    if image.bytes.is_empty() {
        return Err(FieldError::new("image", IMAGE_EMPTY));
    }
    if image.bytes.len() > MAX_IMAGE_SIZE {
        return Err(FieldError::new("image", IMAGE_TOO_LARGE));
    }

    match image.content_type {
        Some(ct) if ALLOWED_IMAGE_TYPES.contains(&ct.as_str()) => Ok(ReportImage {
            bytes: image.bytes,
            content_type: ct,
        }),
        _ => Err(FieldError::new("image", IMAGE_UNSUPPORTED)),
    }
}

fn parse_coordinate(
    field: &str,
    raw: Option<String>,
    bound: f64,
) -> std::result::Result<f64, FieldError> {
    let raw = non_empty(raw).ok_or_else(|| FieldError::new(field, FIELD_REQUIRED))?;
    let value: f64 = raw
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| FieldError::new(field, NUMBER_INVALID))?;

    if value.abs() > bound {
        return Err(FieldError::new(
            field,
            format!("Ensure this value is between -{} and {}.", bound, bound),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(len: usize, content_type: &str) -> Option<UploadedImage> {
        Some(UploadedImage {
            bytes: Bytes::from(vec![0xFF; len]),
            content_type: Some(content_type.to_string()),
        })
    }

    fn form() -> ReportForm {
        ReportForm {
            image: image(16, "image/jpeg"),
            location_lat: Some("12.97".to_string()),
            location_lng: Some("77.59".to_string()),
            ..Default::default()
        }
    }

    fn field_errors(err: AppError) -> Vec<FieldError> {
        match err {
            AppError::InvalidFields(fields) => fields,
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_image_checks_run_in_order() {
        assert_eq!(validate_image(None).unwrap_err().message, IMAGE_REQUIRED);
        assert_eq!(
            validate_image(image(0, "text/plain")).unwrap_err().message,
            IMAGE_EMPTY
        );
        // size is checked before the content type
        assert_eq!(
            validate_image(image(MAX_IMAGE_SIZE + 1, "text/plain"))
                .unwrap_err()
                .message,
            IMAGE_TOO_LARGE
        );
        assert_eq!(
            validate_image(image(100, "image/gif")).unwrap_err().message,
            IMAGE_UNSUPPORTED
        );
        assert!(validate_image(image(MAX_IMAGE_SIZE, "image/png")).is_ok());
    }

    #[test]
    fn test_missing_content_type_is_unsupported() {
        let img = Some(UploadedImage {
            bytes: Bytes::from_static(b"abc"),
            content_type: None,
        });
        assert_eq!(validate_image(img).unwrap_err().message, IMAGE_UNSUPPORTED);
    }

    #[test]
    fn test_valid_form_defaults_severity() {
        let submission = form().validate(WasteType::General).unwrap();
        assert_eq!(submission.severity, ReportSeverity::Medium);
        assert_eq!(submission.location_lat, 12.97);
        assert!(submission.description.is_none());
        assert_eq!(submission.image.content_type, "image/jpeg");
    }

    #[test]
    fn test_errors_are_scoped_to_fields() {
        let bad = ReportForm {
            image: None,
            location_lat: None,
            location_lng: Some("east".to_string()),
            severity: Some("urgent".to_string()),
            address: Some("x".repeat(256)),
            ..Default::default()
        };
        let fields: Vec<String> = field_errors(bad.validate(WasteType::General).unwrap_err())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec!["image", "location_lat", "location_lng", "severity", "address"]
        );
    }

    #[test]
    fn test_out_of_range_latitude() {
        let mut f = form();
        f.location_lat = Some("91".to_string());
        let errors = field_errors(f.validate(WasteType::General).unwrap_err());
        assert_eq!(errors[0].field, "location_lat");
    }

    #[test]
    fn test_preparation_time_only_read_for_food() {
        let mut f = form();
        f.preparation_time = Some("2026-01-01T10:00:00Z".to_string());
        assert!(f.validate(WasteType::General).unwrap().preparation_time.is_none());

        let mut f = form();
        f.preparation_time = Some("2026-01-01T10:00:00+05:30".to_string());
        let prep = f.validate(WasteType::FoodWaste).unwrap().preparation_time.unwrap();
        assert_eq!(prep.to_rfc3339(), "2026-01-01T04:30:00+00:00");
    }

    #[test]
    fn test_bad_preparation_time_rejected() {
        let mut f = form();
        f.preparation_time = Some("yesterday".to_string());
        let errors = field_errors(f.validate(WasteType::FoodWaste).unwrap_err());
        assert_eq!(errors[0].field, "preparation_time");
    }
}
