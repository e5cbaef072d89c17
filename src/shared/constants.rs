/// Maximum accepted report image size in bytes (20MB)
pub const MAX_IMAGE_SIZE: usize = 20 * 1024 * 1024;

/// Content types accepted for report images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Labels that verify a general waste report
pub const GARBAGE_LABELS: &[&str] = &[
    "trash",
    "garbage",
    "waste",
    "plastic bag",
    "dumpster",
    "landfill",
];

/// Labels that verify a food waste report
pub const FOOD_LABELS: &[&str] = &["food", "meal", "dish", "cuisine", "ingredient", "plate"];

/// A general report must exceed this confidence before the authority is emailed
pub const AUTHORITY_CONFIDENCE_THRESHOLD: f64 = 0.80;

/// Food prepared longer ago than this is no longer considered fresh
pub const FOOD_FRESHNESS_HOURS: i64 = 3;
