//! Read-once dictionaries. Every catalog here is constructed once per run from parsed
//! records and then shared immutably.

pub mod element;
pub mod params;

pub use element::{ElementCatalog, ElementRecord};
pub use params::ParamCatalog;
