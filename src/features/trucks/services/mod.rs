pub mod truck_service;

pub use truck_service::current_locations;
