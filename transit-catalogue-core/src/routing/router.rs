//! Fastest-path queries over a loaded catalogue under a wait/ride cost model.

use hashbrown::HashMap;
use log::info;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::error::Error;
use crate::model::{Bus, BusId, StopId, TransportCatalogue};
use crate::routing::dijkstra::shortest_path;

/// Routing cost model: minutes spent at a stop before any boarding, and the
/// constant bus velocity that turns road meters into minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before a bus can be boarded.
    pub bus_wait_time: f64,
    /// Bus velocity in km/h; must be positive and finite.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    fn validate(self) -> Result<(), Error> {
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "bus velocity must be positive, got {}",
                self.bus_velocity
            )));
        }
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "bus wait time must be non-negative, got {}",
                self.bus_wait_time
            )));
        }
        Ok(())
    }

    fn velocity_meters_per_minute(self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }
}

/// One leg of a computed journey, in minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RoutePart {
    /// Waiting at a stop until a bus can be boarded.
    Wait { stop_name: String, time: f64 },
    /// Riding one bus across `span_count` consecutive stop-to-stop hops.
    Ride {
        bus_name: String,
        span_count: usize,
        time: f64,
    },
}

/// An ordered journey between two stops and its total duration in minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub total_time: f64,
    pub parts: Vec<RoutePart>,
}

/// Domain meaning of one graph edge; resolved to names at query time.
#[derive(Debug, Clone, Copy)]
enum EdgePart {
    Wait { stop: StopId },
    Ride { bus: BusId, span_count: usize },
}

/// The two graph vertices backing one stop.
#[derive(Debug, Clone, Copy)]
struct VertexPair {
    /// Rides arrive here; a journey also starts here.
    arrival: NodeIndex,
    /// Reached by paying the wait edge; rides depart from here.
    depart: NodeIndex,
}

/// Immutable fastest-path facade, built once over a loaded catalogue and
/// shared read-only by all queries.
///
/// Every stop contributes two vertices joined by a single wait edge, so the
/// wait cost is charged exactly once per boarding event: a transfer always
/// pays it, while staying aboard one bus across several stops rides a single
/// span edge past the intermediate stops.
pub struct TransitRouter {
    settings: RoutingSettings,
    graph: DiGraph<(), f64>,
    /// Domain meaning per edge, indexed by `EdgeIndex::index()`.
    edge_parts: Vec<EdgePart>,
    /// Vertex pair per stop, indexed by `StopId`.
    vertices: Vec<VertexPair>,
    /// Name snapshots, so queries need no catalogue borrow.
    stop_ids: HashMap<String, StopId>,
    stop_names: Vec<String>,
    bus_names: Vec<String>,
}

impl TransitRouter {
    /// Compiles the routing graph for `catalogue`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] for a non-positive velocity or a
    /// negative wait time, before any graph work is done.
    pub fn new(catalogue: &TransportCatalogue, settings: RoutingSettings) -> Result<Self, Error> {
        settings.validate()?;

        let stops = catalogue.stops();
        let mut graph = DiGraph::with_capacity(stops.len() * 2, stops.len());
        let mut edge_parts = Vec::new();
        let mut vertices = Vec::with_capacity(stops.len());

        for stop in 0..stops.len() {
            let arrival = graph.add_node(());
            let depart = graph.add_node(());
            let edge = graph.add_edge(arrival, depart, settings.bus_wait_time);
            debug_assert_eq!(edge.index(), edge_parts.len());
            edge_parts.push(EdgePart::Wait { stop });
            vertices.push(VertexPair { arrival, depart });
        }

        let meters_per_minute = settings.velocity_meters_per_minute();
        for (bus_id, bus) in catalogue.buses().iter().enumerate() {
            add_bus_edges(
                &mut graph,
                &mut edge_parts,
                &vertices,
                catalogue,
                bus_id,
                bus,
                meters_per_minute,
            );
        }

        info!(
            "routing graph built: {} vertices, {} edges over {} stops and {} buses",
            graph.node_count(),
            graph.edge_count(),
            stops.len(),
            catalogue.buses().len()
        );

        Ok(Self {
            settings,
            graph,
            edge_parts,
            vertices,
            stop_ids: stops
                .iter()
                .enumerate()
                .map(|(id, stop)| (stop.name.clone(), id))
                .collect(),
            stop_names: stops.iter().map(|stop| stop.name.clone()).collect(),
            bus_names: catalogue.buses().iter().map(|bus| bus.name.clone()).collect(),
        })
    }

    /// Fastest journey between two named stops.
    ///
    /// `None` when either name is unknown or no route exists; both are
    /// structurally valid outcomes, not errors. A query from a known stop to
    /// itself is a valid empty journey of zero cost.
    pub fn build_route(&self, from: &str, to: &str) -> Option<RoutePlan> {
        let from = *self.stop_ids.get(from)?;
        let to = *self.stop_ids.get(to)?;

        let (total_time, edges) = shortest_path(
            &self.graph,
            self.vertices[from].arrival,
            self.vertices[to].arrival,
        )?;

        let parts = edges
            .into_iter()
            .map(|edge| {
                let time = self.graph[edge];
                match self.edge_parts[edge.index()] {
                    EdgePart::Wait { stop } => RoutePart::Wait {
                        stop_name: self.stop_names[stop].clone(),
                        time,
                    },
                    EdgePart::Ride { bus, span_count } => RoutePart::Ride {
                        bus_name: self.bus_names[bus].clone(),
                        span_count,
                        time,
                    },
                }
            })
            .collect();

        Some(RoutePlan { total_time, parts })
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    /// Edge weights in allocation order; rebuilding from the same catalogue
    /// and settings yields the same sequence.
    #[cfg(test)]
    fn edge_weights(&self) -> Vec<f64> {
        self.graph.edge_weights().copied().collect()
    }
}

/// One ride edge for every reachable span `(i, j)`, `i < j`, so the solver
/// can stay aboard across intermediate stops without being routed through
/// their wait edges. Span distance accumulates consecutive directed lookups.
fn add_bus_edges(
    graph: &mut DiGraph<(), f64>,
    edge_parts: &mut Vec<EdgePart>,
    vertices: &[VertexPair],
    catalogue: &TransportCatalogue,
    bus_id: BusId,
    bus: &Bus,
    meters_per_minute: f64,
) {
    for i in 0..bus.stops.len() {
        let mut road_meters: u64 = 0;
        for j in (i + 1)..bus.stops.len() {
            road_meters += u64::from(catalogue.distance_between(bus.stops[j - 1], bus.stops[j]));
            let time = road_meters as f64 / meters_per_minute;
            let edge = graph.add_edge(
                vertices[bus.stops[i]].depart,
                vertices[bus.stops[j]].arrival,
                time,
            );
            debug_assert_eq!(edge.index(), edge_parts.len());
            edge_parts.push(EdgePart::Ride {
                bus: bus_id,
                span_count: j - i,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::Point;

    use super::{RoutePart, RoutingSettings, TransitRouter};
    use crate::error::Error;
    use crate::model::TransportCatalogue;

    fn sample_catalogue() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
        let b = catalogue.add_stop("B", Point::new(1.0, 0.0)).unwrap();
        let c = catalogue.add_stop("C", Point::new(2.0, 0.0)).unwrap();
        catalogue.add_distance(a, b, 1000).unwrap();
        catalogue.add_distance(b, c, 1000).unwrap();
        catalogue.add_bus("1", vec![a, b, c, a], true).unwrap();
        catalogue
    }

    fn settings() -> RoutingSettings {
        RoutingSettings {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }

    #[test]
    fn single_bus_journey_waits_once_and_rides_through() {
        let catalogue = sample_catalogue();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let plan = router.build_route("A", "C").unwrap();
        // 6 min wait + 2000 m at 666.67 m/min
        assert_relative_eq!(plan.total_time, 9.0, max_relative = 1e-9);
        assert_eq!(plan.parts.len(), 2);
        assert_eq!(
            plan.parts[0],
            RoutePart::Wait {
                stop_name: "A".to_string(),
                time: 6.0,
            }
        );
        match &plan.parts[1] {
            RoutePart::Ride {
                bus_name,
                span_count,
                time,
            } => {
                assert_eq!(bus_name, "1");
                assert_eq!(*span_count, 2);
                assert_relative_eq!(*time, 3.0, max_relative = 1e-9);
            }
            other => panic!("expected a ride leg, got {other:?}"),
        }
    }

    #[test]
    fn unknown_stop_is_none() {
        let catalogue = sample_catalogue();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();
        assert!(router.build_route("A", "Z").is_none());
        assert!(router.build_route("Z", "A").is_none());
    }

    #[test]
    fn disconnected_stops_have_no_route() {
        let mut catalogue = sample_catalogue();
        catalogue.add_stop("D", Point::new(9.0, 0.0)).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();
        assert!(router.build_route("A", "D").is_none());
    }

    #[test]
    fn same_stop_journey_is_empty_and_free() {
        let catalogue = sample_catalogue();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let plan = router.build_route("A", "A").unwrap();
        assert_eq!(plan.total_time, 0.0);
        assert!(plan.parts.is_empty());
    }

    #[test]
    fn transfer_pays_the_wait_edge_again() {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
        let b = catalogue.add_stop("B", Point::new(1.0, 0.0)).unwrap();
        let c = catalogue.add_stop("C", Point::new(2.0, 0.0)).unwrap();
        catalogue.add_distance(a, b, 2000).unwrap();
        catalogue.add_distance(b, c, 2000).unwrap();
        catalogue.add_bus("first", vec![a, b], false).unwrap();
        catalogue.add_bus("second", vec![b, c], false).unwrap();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();

        let plan = router.build_route("A", "C").unwrap();
        // wait 6 + ride 3 + wait 6 + ride 3
        assert_relative_eq!(plan.total_time, 18.0, max_relative = 1e-9);
        assert_eq!(plan.parts.len(), 4);
        assert!(matches!(plan.parts[2], RoutePart::Wait { .. }));
    }

    #[test]
    fn rebuild_is_deterministic() {
        let catalogue = sample_catalogue();
        let first = TransitRouter::new(&catalogue, settings()).unwrap();
        let second = TransitRouter::new(&catalogue, settings()).unwrap();

        assert_eq!(first.edge_weights(), second.edge_weights());
        assert_eq!(first.build_route("A", "C"), second.build_route("A", "C"));
        assert_eq!(first.build_route("B", "A"), second.build_route("B", "A"));
    }

    #[test]
    fn invalid_settings_are_rejected_before_building() {
        let catalogue = sample_catalogue();
        for settings in [
            RoutingSettings {
                bus_wait_time: 6.0,
                bus_velocity: 0.0,
            },
            RoutingSettings {
                bus_wait_time: 6.0,
                bus_velocity: -10.0,
            },
            RoutingSettings {
                bus_wait_time: -1.0,
                bus_velocity: 40.0,
            },
            RoutingSettings {
                bus_wait_time: f64::NAN,
                bus_velocity: 40.0,
            },
        ] {
            assert!(matches!(
                TransitRouter::new(&catalogue, settings),
                Err(Error::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn route_plan_serializes_with_tagged_parts() {
        let catalogue = sample_catalogue();
        let router = TransitRouter::new(&catalogue, settings()).unwrap();
        let plan = router.build_route("A", "C").unwrap();

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["parts"][0]["type"], "Wait");
        assert_eq!(json["parts"][1]["type"], "Ride");
        assert_eq!(json["parts"][1]["span_count"], 2);
    }
}
