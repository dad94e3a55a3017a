//! Convenience re-exports of the crate's main types.

pub use crate::error::Error;
pub use crate::model::geo::great_circle_distance;
pub use crate::model::{Bus, BusId, RouteStats, Stop, StopId, TransportCatalogue};
pub use crate::routing::{RoutePart, RoutePlan, RoutingSettings, TransitRouter};
