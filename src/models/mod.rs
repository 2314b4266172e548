//! Problem data: cities and the registry tours are built from.
//!
//! A [`CityRegistry`] is created once per run and shared by every tour of
//! that run through an `Arc`. Tours refer to cities by registry index, so
//! city identity is the index, not the coordinates.

mod city;
mod registry;

pub use city::City;
pub use registry::CityRegistry;
