pub mod truck_handler;

pub use truck_handler::{__path_list_truck_locations, list_truck_locations};
