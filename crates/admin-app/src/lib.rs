//! # Admin App Library
//!
//! The caller side of the data provider: typed models, the resource
//! registry, typed clients and the wiring that ties them to one provider.
//! Exposed as a library for integration testing.

pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod resources;
