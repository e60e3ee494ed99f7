//! Car and filter catalog: record types, choice sets and storage.

pub mod choices;
pub mod model;
pub mod store;

pub use choices::{Cylinders, Engine, OilSpecific, Primary, Typology};
pub use model::{Car, CarFilter, CarQuery, Filter, NewCar, NewFilter};
pub use store::{CatalogRepository, SeaOrmCatalog};
