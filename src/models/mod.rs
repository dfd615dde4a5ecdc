//! Modelos de datos
//!
//! Structs que mapean a las tablas PostgreSQL del esquema.

pub mod bus;
pub mod district;
pub mod driver;
pub mod representative;
pub mod route;
pub mod trip;
pub mod university;

pub use bus::Bus;
pub use district::District;
pub use driver::Driver;
pub use representative::Representative;
pub use route::Route;
pub use trip::{RouteTrip, Trip, TripDirection, TripStatus};
pub use university::University;
