pub mod report_dto;
pub mod report_form;

pub use report_dto::*;
pub use report_form::{ReportForm, ReportImage, ReportSubmission};
