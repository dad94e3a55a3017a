//! The transit catalogue: owns every stop and bus, the directed road
//! distance table and the stop-to-buses index.

use std::collections::BTreeSet;

use geo::Point;
use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;

use crate::error::Error;
use crate::model::geo::great_circle_distance;
use crate::model::types::{Bus, BusId, RouteStats, Stop, StopId};

/// Append-only store for stops and buses, populated during a single load
/// phase (stops, then distances, then buses) and read-only afterwards.
///
/// Entities live in arenas and every cross-reference is an arena index, so
/// the catalogue is the sole owner of all entity data; the arenas and the
/// derived indices stay stable for the catalogue lifetime.
#[derive(Debug, Default, Clone)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    stop_ids: HashMap<String, StopId>,
    bus_ids: HashMap<String, BusId>,
    /// Directed road distances in meters, keyed by `(from, to)`.
    distances: HashMap<(StopId, StopId), u32>,
    /// Names of buses calling at each stop, indexed by `StopId`.
    buses_on_stop: Vec<BTreeSet<String>>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stop and returns its arena id.
    ///
    /// Duplicate names are rejected, not overwritten, so name-to-id lookups
    /// stay unambiguous for every later reference.
    pub fn add_stop(&mut self, name: &str, location: Point<f64>) -> Result<StopId, Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.stop_ids.contains_key(name) {
            return Err(Error::DuplicateStop(name.to_string()));
        }

        let id = self.stops.len();
        self.stops.push(Stop {
            name: name.to_string(),
            location,
        });
        self.stop_ids.insert(name.to_string(), id);
        self.buses_on_stop.push(BTreeSet::new());
        Ok(id)
    }

    /// Inserts one directed distance entry. A later insert for the same
    /// ordered pair overwrites the earlier one.
    pub fn add_distance(&mut self, from: StopId, to: StopId, meters: u32) -> Result<(), Error> {
        self.validate_stop(from)?;
        self.validate_stop(to)?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Name-based convenience over [`Self::add_distance`] for the ingestion
    /// layer.
    pub fn add_distance_between(&mut self, from: &str, to: &str, meters: u32) -> Result<(), Error> {
        let from = self
            .stop_id(from)
            .ok_or_else(|| Error::UnknownStop(from.to_string()))?;
        let to = self
            .stop_id(to)
            .ok_or_else(|| Error::UnknownStop(to.to_string()))?;
        self.add_distance(from, to, meters)
    }

    /// Registers a bus over an already-resolved stop sequence and updates
    /// the stop-to-buses index for every visited stop.
    ///
    /// The ingestion layer resolves stop names to ids beforehand (see
    /// [`Self::stop_id`]); the catalogue only validates that every id is in
    /// range.
    pub fn add_bus(
        &mut self,
        name: &str,
        stops: Vec<StopId>,
        is_roundtrip: bool,
    ) -> Result<BusId, Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.bus_ids.contains_key(name) {
            return Err(Error::DuplicateBus(name.to_string()));
        }
        for &stop in &stops {
            self.validate_stop(stop)?;
        }

        let id = self.buses.len();
        for &stop in &stops {
            self.buses_on_stop[stop].insert(name.to_string());
        }
        debug!("registered bus `{name}` over {} stops", stops.len());
        self.buses.push(Bus {
            name: name.to_string(),
            stops,
            is_roundtrip,
        });
        self.bus_ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Aggregate statistics for the named bus, or `None` if it is unknown.
    ///
    /// Road length sums the directed distance table over consecutive stops
    /// plus the closing hop from last back to first; the great-circle sum
    /// over the same hops is curvature's denominator.
    pub fn route_info(&self, name: &str) -> Option<RouteStats> {
        let bus = &self.buses[*self.bus_ids.get(name)?];

        let mut road_length: u64 = 0;
        let mut geographic_length = 0.0;
        for (from, to) in bus.stops.iter().copied().circular_tuple_windows() {
            road_length += u64::from(self.distance_between(from, to));
            geographic_length +=
                great_circle_distance(self.stops[from].location, self.stops[to].location);
        }

        let curvature = if geographic_length > 0.0 {
            road_length as f64 / geographic_length
        } else {
            0.0
        };

        Some(RouteStats {
            stop_count: bus.stops.len(),
            unique_stop_count: bus.stops.iter().unique().count(),
            road_length,
            geographic_length,
            curvature,
        })
    }

    /// Buses calling at the named stop, sorted by name.
    ///
    /// `None` when the stop itself is unknown, as opposed to `Some` of an
    /// empty set for a known stop served by no bus.
    pub fn stop_info(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.stop_ids.get(name).map(|&id| &self.buses_on_stop[id])
    }

    /// Directed road distance with symmetric fallback: the `(from, to)`
    /// entry if present, otherwise `(to, from)`, otherwise 0.
    pub fn distance_between(&self, from: StopId, to: StopId) -> u32 {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id]
    }

    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id]
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_ids.get(name).copied()
    }

    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_ids.get(name).copied()
    }

    /// Full stop-to-buses index, parallel to [`Self::stops`].
    pub fn stop_buses(&self) -> &[BTreeSet<String>] {
        &self.buses_on_stop
    }

    fn validate_stop(&self, id: StopId) -> Result<(), Error> {
        if id < self.stops.len() {
            Ok(())
        } else {
            Err(Error::UnknownStopId(id))
        }
    }
}
