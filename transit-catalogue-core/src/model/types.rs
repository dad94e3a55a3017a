//! Core entities of the transit catalogue.

use geo::Point;
use serde::Serialize;

/// Index of a stop in the catalogue arena.
pub type StopId = usize;
/// Index of a bus in the catalogue arena.
pub type BusId = usize;

/// A named geographic point served by buses. Immutable once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    /// `(x = longitude, y = latitude)` in degrees
    pub location: Point<f64>,
}

/// A named bus route: an ordered stop sequence plus a roundtrip flag.
///
/// There-and-back routes list the return leg explicitly, so the sequence may
/// repeat stops. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    pub name: String,
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}

/// Aggregate statistics for one bus route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStats {
    /// Length of the stop sequence, repeats included.
    pub stop_count: usize,
    /// Number of distinct stops visited.
    pub unique_stop_count: usize,
    /// Sum of directed road distances over consecutive stops plus the
    /// closing hop from last back to first, meters.
    pub road_length: u64,
    /// Great-circle sum over the same hops, meters.
    pub geographic_length: f64,
    /// `road_length / geographic_length`; at least 1.0 in consistent data,
    /// 0.0 when the geographic length is zero.
    pub curvature: f64,
}
