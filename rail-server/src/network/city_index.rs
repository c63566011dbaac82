//! City → stations lookup.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{CityKey, StationCode};

use super::graph::RailGraph;

/// A city and the stations that serve it.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// Display spelling.
    pub name: String,
    pub stations: BTreeSet<StationCode>,
}

/// Case-insensitive index from city name to its stations.
///
/// Derived from the graph's stations once after load. Station sets are
/// ordered, so iterating them is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityIndex {
    cities: BTreeMap<CityKey, City>,
}

impl CityIndex {
    /// Build the index from every station in the graph.
    ///
    /// When a city is spelled differently by different stations, the
    /// spelling of the station with the smallest code is kept.
    pub fn build(graph: &RailGraph) -> Self {
        let mut stations: Vec<_> = graph.stations().collect();
        stations.sort_by(|a, b| a.code.cmp(&b.code));

        let mut cities: BTreeMap<CityKey, City> = BTreeMap::new();
        for station in stations {
            let Some(key) = CityKey::new(&station.city) else {
                continue;
            };
            cities
                .entry(key)
                .or_insert_with(|| City {
                    name: station.city.trim().to_string(),
                    stations: BTreeSet::new(),
                })
                .stations
                .insert(station.code.clone());
        }

        Self { cities }
    }

    /// Look up a city by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&City> {
        CityKey::new(name).and_then(|key| self.cities.get(&key))
    }

    /// Stations of a city, if the city is known.
    pub fn stations_for(&self, name: &str) -> Option<&BTreeSet<StationCode>> {
        self.get(name).map(|c| &c.stations)
    }

    /// Display names of all cities, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.values().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if there are no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{EdgeRecord, StationRecord};

    fn graph() -> RailGraph {
        RailGraph::build(
            vec![
                StationRecord::new("MAN", "Manchester Piccadilly", "manchester", 53.477, -2.231),
                StationRecord::new("MCV", "Manchester Victoria", "Manchester", 53.487, -2.242),
                StationRecord::new("LDS", "Leeds", "Leeds", 53.795, -1.548),
                StationRecord::new("EUS", "London Euston", "London", 51.528, -0.134),
                StationRecord::new("KGX", "London Kings Cross", "London", 51.531, -0.124),
            ],
            Vec::<EdgeRecord>::new(),
        )
        .unwrap()
    }

    fn codes(set: &BTreeSet<StationCode>) -> Vec<&str> {
        set.iter().map(|c| c.as_str()).collect()
    }

    #[test]
    fn groups_stations_by_city() {
        let index = CityIndex::build(&graph());

        assert_eq!(index.len(), 3);
        assert_eq!(codes(index.stations_for("London").unwrap()), vec!["EUS", "KGX"]);
        assert_eq!(codes(index.stations_for("Leeds").unwrap()), vec!["LDS"]);
    }

    #[test]
    fn lookup_ignores_case() {
        let index = CityIndex::build(&graph());

        assert!(index.get("LONDON").is_some());
        assert!(index.get(" leeds ").is_some());
        assert_eq!(codes(index.stations_for("MANCHESTER").unwrap()), vec!["MAN", "MCV"]);
    }

    #[test]
    fn display_spelling_from_smallest_code() {
        let index = CityIndex::build(&graph());
        // MAN < MCV, and MAN spells it lowercase
        assert_eq!(index.get("Manchester").unwrap().name, "manchester");
    }

    #[test]
    fn unknown_city() {
        let index = CityIndex::build(&graph());
        assert!(index.get("Londn").is_none());
        assert!(index.get("").is_none());
    }

    #[test]
    fn names_are_sorted() {
        let index = CityIndex::build(&graph());
        assert_eq!(index.names(), vec!["Leeds", "London", "manchester"]);
    }

    #[test]
    fn empty_graph() {
        let index = CityIndex::build(&RailGraph::default());
        assert!(index.is_empty());
        assert!(index.names().is_empty());
    }
}
