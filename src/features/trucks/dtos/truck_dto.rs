use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simulated position of a collection truck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TruckLocationDto {
    pub id: i32,
    pub lat: f64,
    pub lng: f64,
}
