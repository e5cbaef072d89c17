use axum::{routing::get, Router};

use crate::features::trucks::handlers;

pub fn routes() -> Router {
    Router::new().route("/api/trucks/locations", get(handlers::list_truck_locations))
}
