pub mod bus_repository;
pub mod district_repository;
pub mod driver_repository;
pub mod representative_repository;
pub mod route_repository;
pub mod statistics_repository;
pub mod trip_repository;
pub mod university_repository;
