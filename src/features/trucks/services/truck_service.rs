use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::features::trucks::dtos::TruckLocationDto;

/// Depot positions around Bengaluru (Majestic, Koramangala, Hebbal)
const BASE_POSITIONS: [TruckLocationDto; 3] = [
    TruckLocationDto {
        id: 1,
        lat: 12.9716,
        lng: 77.5946,
    },
    TruckLocationDto {
        id: 2,
        lat: 12.9279,
        lng: 77.6271,
    },
    TruckLocationDto {
        id: 3,
        lat: 13.0358,
        lng: 77.5970,
    },
];

const JITTER_SCALE: f64 = 0.001;

/// Fake live positions: each axis drifts by `(r - 0.5) * 0.001 * (now_secs % 10)`
pub fn current_locations() -> Vec<TruckLocationDto> {
    let now_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    jittered(now_secs, &mut rand::rng())
}

fn jittered<R: Rng + ?Sized>(now_secs: f64, rng: &mut R) -> Vec<TruckLocationDto> {
    let spread = JITTER_SCALE * (now_secs % 10.0);
    BASE_POSITIONS
        .iter()
        .map(|truck| TruckLocationDto {
            id: truck.id,
            lat: truck.lat + (rng.random::<f64>() - 0.5) * spread,
            lng: truck.lng + (rng.random::<f64>() - 0.5) * spread,
        })
        .collect()
}
