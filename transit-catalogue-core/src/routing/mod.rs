//! Fastest-path routing over a loaded catalogue.

mod dijkstra;
mod router;

pub use router::{RoutePart, RoutePlan, RoutingSettings, TransitRouter};
