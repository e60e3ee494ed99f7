//! Database entities

pub mod car;
pub mod car_filter;
pub mod filter;

pub use car::Entity as Car;
pub use car_filter::Entity as CarFilter;
pub use filter::Entity as Filter;
