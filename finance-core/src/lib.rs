pub mod calculations;
pub mod input;
pub mod models;
pub mod tables;

pub use models::*;
pub use tables::TaxTables;
