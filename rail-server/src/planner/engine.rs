//! Single-source shortest paths over the rail graph.
//!
//! One traversal skeleton serves both cost modes. In [`CostMode::Distance`]
//! the frontier is a min-heap on accumulated kilometres (Dijkstra); in
//! [`CostMode::Stops`] it is a FIFO queue and every edge costs 1
//! (breadth-first search). Both settle a station once and relax its
//! outgoing edges, updating a neighbour only on a strictly lower cost. FIFO
//! order means a stops search never finds a cheaper route to an already
//! discovered station, so the shared rule settles stations on discovery
//! there, as BFS requires.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::StationCode;
use crate::network::{Edge, RailGraph};

/// What a route minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Total kilometres; additive edge weights.
    Distance,
    /// Number of legs; every edge costs 1.
    Stops,
}

impl CostMode {
    /// Cost of traversing one edge.
    fn edge_cost(self, edge: &Edge) -> f64 {
        match self {
            CostMode::Distance => edge.distance_km,
            CostMode::Stops => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CostMode::Distance => "distance",
            CostMode::Stops => "stops",
        }
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown cost mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cost mode {0:?} (expected \"distance\" or \"stops\")")]
pub struct InvalidCostMode(String);

impl FromStr for CostMode {
    type Err = InvalidCostMode;

    /// Accepts `distance`/`stops`, and the algorithm names `dijkstra`/`bfs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" | "dijkstra" => Ok(CostMode::Distance),
            "stops" | "bfs" => Ok(CostMode::Stops),
            _ => Err(InvalidCostMode(s.to_string())),
        }
    }
}

/// The search source is not a station of the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station {0}")]
pub struct UnknownStation(pub StationCode);

/// How a station was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Reached {
    /// Accumulated cost from the source (km or legs, per mode).
    pub cost: f64,
    /// Previous station on the shortest path; `None` for the source.
    pub predecessor: Option<StationCode>,
}

/// Shortest-path tree from one source under one cost mode.
///
/// Holds every reachable station; absence means unreachable. Built per
/// query and never shared between sources or modes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    source: StationCode,
    mode: CostMode,
    reached: HashMap<StationCode, Reached>,
}

impl SearchResult {
    pub fn source(&self) -> &StationCode {
        &self.source
    }

    pub fn mode(&self) -> CostMode {
        self.mode
    }

    /// Cost and predecessor for a station, if reachable.
    pub fn get(&self, station: &StationCode) -> Option<&Reached> {
        self.reached.get(station)
    }

    /// Accumulated cost to a station, if reachable.
    pub fn cost(&self, station: &StationCode) -> Option<f64> {
        self.reached.get(station).map(|r| r.cost)
    }

    pub fn is_reachable(&self, station: &StationCode) -> bool {
        self.reached.contains_key(station)
    }

    /// Number of reachable stations, the source included.
    pub fn len(&self) -> usize {
        self.reached.len()
    }

    /// Always false: the source reaches itself.
    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StationCode, &Reached)> {
        self.reached.iter()
    }
}

/// Min-heap entry. Equal costs pop in station-code order so the settle
/// order does not depend on hashing.
#[derive(Debug)]
struct HeapItem {
    cost: f64,
    station: StationCode,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip both keys: BinaryHeap is a max-heap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.station.cmp(&self.station))
    }
}

/// Discovered-but-unsettled stations.
enum Frontier {
    Heap(BinaryHeap<HeapItem>),
    Queue(VecDeque<StationCode>),
}

impl Frontier {
    fn for_mode(mode: CostMode) -> Self {
        match mode {
            CostMode::Distance => Frontier::Heap(BinaryHeap::new()),
            CostMode::Stops => Frontier::Queue(VecDeque::new()),
        }
    }

    fn push(&mut self, station: StationCode, cost: f64) {
        match self {
            Frontier::Heap(heap) => heap.push(HeapItem { cost, station }),
            Frontier::Queue(queue) => queue.push_back(station),
        }
    }

    fn pop(&mut self) -> Option<StationCode> {
        match self {
            Frontier::Heap(heap) => heap.pop().map(|item| item.station),
            Frontier::Queue(queue) => queue.pop_front(),
        }
    }
}

/// Compute shortest costs and predecessors from `source` to every station
/// reachable from it.
///
/// Runs to exhaustion; there is no target and no early exit. Complexity is
/// O((S + E) log S) for distance and O(S + E) for stops.
pub fn shortest_paths(
    graph: &RailGraph,
    source: &StationCode,
    mode: CostMode,
) -> Result<SearchResult, UnknownStation> {
    if !graph.contains(source) {
        return Err(UnknownStation(source.clone()));
    }

    let mut reached: HashMap<StationCode, Reached> = HashMap::new();
    let mut settled: HashSet<StationCode> = HashSet::new();
    let mut frontier = Frontier::for_mode(mode);

    reached.insert(
        source.clone(),
        Reached {
            cost: 0.0,
            predecessor: None,
        },
    );
    frontier.push(source.clone(), 0.0);

    while let Some(station) = frontier.pop() {
        // Stale heap entries for already-settled stations
        if settled.contains(&station) {
            continue;
        }
        let Some(cost) = reached.get(&station).map(|r| r.cost) else {
            continue;
        };
        settled.insert(station.clone());

        trace!(station = %station, cost, "Settled station");

        for edge in graph.outgoing(&station) {
            let candidate = cost + mode.edge_cost(edge);
            let improves = reached
                .get(&edge.to)
                .is_none_or(|existing| candidate < existing.cost);
            if !improves {
                continue;
            }

            reached.insert(
                edge.to.clone(),
                Reached {
                    cost: candidate,
                    predecessor: Some(station.clone()),
                },
            );
            frontier.push(edge.to.clone(), candidate);
        }
    }

    debug!(
        source = %source,
        mode = %mode,
        reached = reached.len(),
        "Shortest-path search complete"
    );

    Ok(SearchResult {
        source: source.clone(),
        mode,
        reached,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::{EdgeRecord, StationRecord};
    use crate::planner::reconstruct;
    use proptest::prelude::*;

    const CODES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

    fn arb_graph() -> impl Strategy<Value = RailGraph> {
        let edge = (0..CODES.len(), 0..CODES.len(), 0.0f64..250.0);
        prop::collection::vec(edge, 0..30).prop_map(|edges| {
            let stations = CODES
                .iter()
                .enumerate()
                .map(|(i, c)| StationRecord::new(*c, *c, *c, 50.0, i as f64 * 0.1));
            let edges = edges
                .into_iter()
                .map(|(a, b, km)| EdgeRecord::new(CODES[a], CODES[b], km));
            RailGraph::build(stations, edges).unwrap()
        })
    }

    proptest! {
        /// Every reached station's distance cost is the exact sum of the
        /// stored edge weights along its reconstructed path.
        #[test]
        fn distance_cost_is_sum_of_path_weights(graph in arb_graph()) {
            for source in CODES {
                let source = StationCode::parse(source).unwrap();
                let result = shortest_paths(&graph, &source, CostMode::Distance).unwrap();

                for (station, reached) in result.iter() {
                    let path = reconstruct(&result, station).unwrap();
                    prop_assert_eq!(path.first(), Some(&source));
                    prop_assert_eq!(path.last(), Some(station));

                    let mut sum = 0.0;
                    for pair in path.windows(2) {
                        sum += graph.edge_weight(&pair[0], &pair[1]).unwrap();
                    }
                    prop_assert_eq!(reached.cost, sum);
                }
            }
        }

        /// Every reached station's stop cost is its path's edge count.
        #[test]
        fn stops_cost_is_path_edge_count(graph in arb_graph()) {
            for source in CODES {
                let source = StationCode::parse(source).unwrap();
                let result = shortest_paths(&graph, &source, CostMode::Stops).unwrap();

                for (station, reached) in result.iter() {
                    let path = reconstruct(&result, station).unwrap();
                    prop_assert_eq!(path.first(), Some(&source));
                    for pair in path.windows(2) {
                        prop_assert!(graph.edge_weight(&pair[0], &pair[1]).is_some());
                    }
                    prop_assert_eq!(reached.cost, (path.len() - 1) as f64);
                }
            }
        }

        /// Both modes reach exactly the same stations.
        #[test]
        fn modes_agree_on_reachability(graph in arb_graph()) {
            for source in CODES {
                let source = StationCode::parse(source).unwrap();
                let by_distance = shortest_paths(&graph, &source, CostMode::Distance).unwrap();
                let by_stops = shortest_paths(&graph, &source, CostMode::Stops).unwrap();

                prop_assert_eq!(by_distance.len(), by_stops.len());
                for (station, _) in by_distance.iter() {
                    prop_assert!(by_stops.is_reachable(station));
                }
            }
        }
    }
}
