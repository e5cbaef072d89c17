use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::chat::{dtos as chat_dtos, handlers as chat_handlers};
use crate::features::habits::{dtos as habits_dtos, handlers as habits_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::trucks::{dtos as trucks_dtos, handlers as trucks_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::obtain_token,
        auth::handlers::refresh_token,
        auth::handlers::get_me,
        // Reports
        reports_handlers::create_report,
        reports_handlers::create_food_report,
        // Staff portal
        reports_handlers::list_reports,
        reports_handlers::get_report,
        reports_handlers::update_report_status,
        // Chat
        chat_handlers::chat,
        // Trucks
        trucks_handlers::list_truck_locations,
        // Habits
        habits_handlers::list_habits,
        habits_handlers::create_habit,
        habits_handlers::delete_habit,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth::dtos::RegisterRequestDto,
            auth::dtos::TokenObtainRequestDto,
            auth::dtos::TokenRefreshRequestDto,
            auth::dtos::TokenPairDto,
            auth::dtos::TokenRefreshResponseDto,
            auth::dtos::UserResponseDto,
            ApiResponse<auth::dtos::UserResponseDto>,
            ApiResponse<auth::dtos::TokenPairDto>,
            ApiResponse<auth::dtos::TokenRefreshResponseDto>,
            // Reports
            reports_models::ReportStatus,
            reports_models::ReportSeverity,
            reports_models::WasteType,
            reports_dtos::ReportOwnerDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::UploadReportDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Chat
            chat_dtos::ChatRequestDto,
            chat_dtos::ChatReplyDto,
            ApiResponse<chat_dtos::ChatReplyDto>,
            // Trucks
            trucks_dtos::TruckLocationDto,
            ApiResponse<Vec<trucks_dtos::TruckLocationDto>>,
            // Habits
            habits_dtos::CreateHabitDto,
            habits_dtos::HabitResponseDto,
            ApiResponse<habits_dtos::HabitResponseDto>,
            ApiResponse<Vec<habits_dtos::HabitResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration and JWT token endpoints"),
        (name = "reports", description = "Citizen waste and food waste reports"),
        (name = "staff", description = "Staff portal (staff and superusers only)"),
        (name = "chat", description = "GreenBot environmental assistant"),
        (name = "trucks", description = "Garbage truck positions"),
        (name = "habits", description = "Personal eco-habit tracking"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "EcoAI API",
        version = "0.1.0",
        description = "API documentation for EcoAI",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
