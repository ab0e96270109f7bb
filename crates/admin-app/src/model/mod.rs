//! Typed records of the three admin collections, with their create and patch payloads.
//!
//! Field names match the backend's JSON exactly; the data provider passes
//! records through untouched, so serde does the mapping here.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
