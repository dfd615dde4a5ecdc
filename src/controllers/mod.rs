pub mod bus_controller;
pub mod district_controller;
pub mod driver_controller;
pub mod import_controller;
pub mod representative_controller;
pub mod route_controller;
pub mod statistics_controller;
pub mod trip_controller;
pub mod university_controller;
