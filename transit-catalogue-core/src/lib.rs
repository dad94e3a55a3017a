//! In-memory transit catalogue and fastest-path router.
//!
//! The crate has two halves:
//!
//! - [`model`]: the [`TransportCatalogue`] owning every stop and bus, the
//!   directed road-distance table and the per-stop bus index, plus the
//!   aggregate route statistics computed over them.
//! - [`routing`]: the [`TransitRouter`], which compiles a loaded catalogue
//!   into a weighted directed graph (two vertices per stop, wait and ride
//!   edges) and answers fastest-path queries between named stops.
//!
//! The catalogue is populated during a single load phase (stops, then
//! distances, then buses) and treated as immutable afterwards; the router is
//! built once over the loaded catalogue and shared read-only by all queries.

pub mod error;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{Bus, BusId, RouteStats, Stop, StopId, TransportCatalogue};
pub use routing::{RoutePart, RoutePlan, RoutingSettings, TransitRouter};
