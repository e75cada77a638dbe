use itertools::Itertools;
use std::{collections::HashMap, str::FromStr};

use crate::error::LoadError;

pub type StationIndex = usize;

/// Travel time along a segment, in minutes.
pub type Time = f64;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stations {
    names: Vec<String>,
    indices: HashMap<String, StationIndex>,
}

impl Stations {
    /// Indexes stations by first appearance. A repeated name is an error.
    pub fn from_names<I, S>(names: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stations = Stations::default();

        for (index, name) in names.into_iter().enumerate() {
            let name = name.into();
            if let Some(&first) = stations.indices.get(&name) {
                return Err(LoadError::DuplicateStation {
                    station: name,
                    first,
                    second: index,
                });
            }
            stations.indices.insert(name.clone(), index);
            stations.names.push(name);
        }

        Ok(stations)
    }

    pub fn index(&self, name: &str) -> Option<StationIndex> {
        self.indices.get(name).copied()
    }

    pub fn resolve(&self, name: &str, table: &str) -> Result<StationIndex, LoadError> {
        self.index(name).ok_or_else(|| LoadError::UnknownStation {
            station: name.to_owned(),
            table: table.to_owned(),
        })
    }

    pub fn name(&self, index: StationIndex) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StationIndex, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }

    pub fn into_maps(self) -> (HashMap<StationIndex, String>, HashMap<String, StationIndex>) {
        (self.names.into_iter().enumerate().collect(), self.indices)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl FromStr for Position {
    type Err = LoadError;

    /// Parses well-known-text points such as `POINT (12.5 -3.25)`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || LoadError::MalformedPoint {
            text: text.to_owned(),
        };

        let (_tag, x, y) = text
            .split_whitespace()
            .collect_tuple()
            .ok_or_else(malformed)?;

        let x = x
            .strip_prefix('(')
            .and_then(|x| x.parse::<f64>().ok())
            .ok_or_else(malformed)?;
        let y = y
            .strip_suffix(')')
            .and_then(|y| y.parse::<f64>().ok())
            .ok_or_else(malformed)?;

        Ok(Position { x, y })
    }
}

impl From<Position> for (f64, f64) {
    fn from(val: Position) -> Self {
        (val.x, val.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttributes {
    pub weight: Time,
    pub color: String,
    pub line: String,
}

/// One arc of the multigraph. `key` tells apart parallel arcs between the same pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: StationIndex,
    pub target: StationIndex,
    pub key: usize,
    pub attributes: EdgeAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn stations_are_indexed_in_list_order() {
        let stations = Stations::from_names(["A", "B", "C"]).unwrap();

        assert_eq!(stations.len(), 3);
        assert!(!stations.is_empty());
        assert_eq!(
            stations.iter().collect::<Vec<_>>(),
            vec![(0, "A"), (1, "B"), (2, "C")]
        );
        assert_eq!(stations.index("A"), Some(0));
        assert_eq!(stations.index("C"), Some(2));
        assert_eq!(stations.name(1), Some("B"));
        assert_eq!(stations.name(3), None);
        assert_eq!(stations.index("D"), None);
    }

    #[test]
    fn duplicate_station_fails_loudly() {
        let err = Stations::from_names(["A", "B", "A"]).unwrap_err();

        match err {
            LoadError::DuplicateStation {
                station,
                first,
                second,
            } => {
                assert_eq!(station, "A");
                assert_eq!(first, 0);
                assert_eq!(second, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolve_names_the_table_on_miss() {
        let stations = Stations::from_names(["A"]).unwrap();

        assert_eq!(stations.resolve("A", "Red").unwrap(), 0);
        let err = stations.resolve("Z", "Red").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownStation { ref station, ref table } if station == "Z" && table == "Red"
        ));
    }

    #[test]
    fn into_maps_builds_both_directions() {
        let stations = Stations::from_names(["A", "B"]).unwrap();
        let (index_to_name, name_to_index) = stations.into_maps();

        assert_eq!(index_to_name.len(), 2);
        assert_eq!(index_to_name[&1], "B");
        assert_eq!(name_to_index["A"], 0);
    }

    #[test]
    fn parses_point_text() {
        let position: Position = "POINT (12.5 -3.25)".parse().unwrap();
        assert_eq!(position, Position { x: 12.5, y: -3.25 });
        assert_eq!(<(f64, f64)>::from(position), (12.5, -3.25));
    }

    #[test]
    fn point_tolerates_extra_whitespace() {
        let position: Position = "  POINT   (0 1)  ".parse().unwrap();
        assert_eq!(position, Position { x: 0.0, y: 1.0 });
    }

    #[test]
    fn rejects_malformed_points() {
        for text in [
            "",
            "POINT",
            "POINT (1)",
            "POINT (1 2 3)",
            "POINT 1 2",
            "POINT (a 2)",
            "POINT (1 b)",
            "(1 2)",
        ] {
            let err = text.parse::<Position>().unwrap_err();
            assert!(
                matches!(err, LoadError::MalformedPoint { .. }),
                "{text:?} should be malformed"
            );
        }
    }

    proptest! {
        #[test]
        fn point_text_parses_back(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6) {
            let text = format!("POINT ({x} {y})");
            let position: Position = text.parse().unwrap();
            prop_assert_eq!(position, Position { x, y });
        }

        #[test]
        fn name_index_round_trip(names in proptest::collection::hash_set("[A-Za-z ]{1,12}", 0..40)) {
            let names: Vec<String> = names.into_iter().collect();
            let stations = Stations::from_names(names.clone()).unwrap();
            let (index_to_name, name_to_index) = stations.into_maps();

            prop_assert_eq!(index_to_name.len(), names.len());
            prop_assert_eq!(name_to_index.len(), names.len());
            for name in &names {
                prop_assert_eq!(&index_to_name[&name_to_index[name]], name);
            }
        }
    }
}
