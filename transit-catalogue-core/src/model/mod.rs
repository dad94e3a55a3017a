//! Data model of the transit catalogue.

pub mod catalogue;
pub mod geo;
pub mod types;

pub use catalogue::TransportCatalogue;
pub use types::{Bus, BusId, RouteStats, Stop, StopId};
