//! One-shot assembly of the transit network from its tables.
//!
//! The station list fixes the node indices, every line file adds arcs tagged
//! with that line, and the coordinates table places the nodes. Any failure
//! aborts the whole load.

use itertools::Itertools;
use std::{
    collections::{BTreeMap, HashMap},
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    colours::LineColours,
    data::{EdgeAttributes, Position, StationIndex, Stations, Time},
    error::LoadError,
    graph::MultiDiGraph,
    sheets::{self, CoordinateRow, LineSegment, SegmentRow, StationRow},
};

const STATIONS_TABLE: &str = "All Stations";
const LINES_DIR: &str = "Lines";
const COORDINATES_TABLE: &str = "Station Coordinates";
const DEFAULT_EXTENSION: &str = "xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Row order of the `Station` column fixes the station indices.
    pub stations_path: PathBuf,
    pub lines_dir: PathBuf,
    pub coordinates_path: PathBuf,
    /// Only files with this extension in `lines_dir` are read as lines.
    pub line_extension: String,
}

impl LoaderConfig {
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        Self::in_dir_with_extension(root, DEFAULT_EXTENSION)
    }

    pub fn in_dir_with_extension(root: impl AsRef<Path>, extension: &str) -> Self {
        let root = root.as_ref();
        Self {
            stations_path: root.join(format!("{STATIONS_TABLE}.{extension}")),
            lines_dir: root.join(LINES_DIR),
            coordinates_path: root.join(format!("{COORDINATES_TABLE}.{extension}")),
            line_extension: extension.to_string(),
        }
    }

    pub fn with_stations_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stations_path = path.into();
        self
    }

    pub fn with_lines_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lines_dir = dir.into();
        self
    }

    pub fn with_coordinates_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.coordinates_path = path.into();
        self
    }

    pub fn with_line_extension(mut self, extension: impl Into<String>) -> Self {
        self.line_extension = extension.into();
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::in_dir("")
    }
}

pub type NetworkParts = (
    MultiDiGraph,
    BTreeMap<StationIndex, Position>,
    Vec<String>,
    Vec<Time>,
    HashMap<StationIndex, String>,
    HashMap<String, StationIndex>,
);

/// `edge_colors` and `edge_weights` are aligned with each other and with the
/// order of [`MultiDiGraph::edges`].
#[derive(Debug, Clone)]
pub struct LoadedNetwork {
    pub graph: MultiDiGraph,
    pub positions: BTreeMap<StationIndex, Position>,
    pub edge_colors: Vec<String>,
    pub edge_weights: Vec<Time>,
    pub index_to_name: HashMap<StationIndex, String>,
    pub name_to_index: HashMap<String, StationIndex>,
}

impl LoadedNetwork {
    pub fn into_parts(self) -> NetworkParts {
        (
            self.graph,
            self.positions,
            self.edge_colors,
            self.edge_weights,
            self.index_to_name,
            self.name_to_index,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFile {
    pub line: String,
    pub path: PathBuf,
}

pub fn load_graph(
    config: &LoaderConfig,
    colours: &LineColours,
) -> Result<LoadedNetwork, LoadError> {
    let stations = load_stations(&config.stations_path)?;
    info!(stations = stations.len(), "Indexed stations");

    let line_files = discover_line_files(&config.lines_dir, &config.line_extension)?;
    info!(
        lines = line_files.len(),
        dir = %config.lines_dir.display(),
        "Discovered line files"
    );

    let segments = load_line_segments(&line_files)?;
    let graph = build_graph(&stations, &segments, colours)?;
    info!(
        segments = segments.len(),
        edges = graph.edge_count(),
        "Built network graph"
    );

    let (edge_weights, edge_colors) = edge_metadata(&graph);

    let positions = load_positions(&config.coordinates_path, &stations)?;
    info!(positions = positions.len(), "Loaded station positions");

    let (index_to_name, name_to_index) = stations.into_maps();

    Ok(LoadedNetwork {
        graph,
        positions,
        edge_colors,
        edge_weights,
        index_to_name,
        name_to_index,
    })
}

pub fn load_stations(path: &Path) -> Result<Stations, LoadError> {
    Stations::from_names(
        sheets::deserialize_into::<StationRow>(path)?
            .into_iter()
            .map(|row| row.station),
    )
}

/// Lists the line tables in `dir`, sorted by path so that loads are reproducible.
pub fn discover_line_files(dir: &Path, extension: &str) -> Result<Vec<LineFile>, LoadError> {
    let io_error = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();

        let matches_extension = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !matches_extension || !path.is_file() {
            continue;
        }

        let line = path
            .file_stem()
            .and_then(OsStr::to_str)
            .map(str::to_owned)
            .ok_or_else(|| LoadError::InvalidLineFileName { path: path.clone() })?;

        files.push(LineFile { line, path });
    }

    Ok(files
        .into_iter()
        .sorted_by(|a, b| a.path.cmp(&b.path))
        .collect())
}

pub fn load_line_segments(files: &[LineFile]) -> Result<Vec<LineSegment>, LoadError> {
    let mut segments = Vec::new();

    for file in files {
        let rows = sheets::deserialize_into::<SegmentRow>(&file.path)?;
        debug!(line = %file.line, segments = rows.len(), "Loaded line file");

        segments.extend(rows.into_iter().map(|row| LineSegment {
            line: file.line.clone(),
            row,
        }));
    }

    Ok(segments)
}

/// Adds one arc per directed segment and a pair of independent arcs per undirected one.
pub fn build_graph(
    stations: &Stations,
    segments: &[LineSegment],
    colours: &LineColours,
) -> Result<MultiDiGraph, LoadError> {
    let mut graph = MultiDiGraph::with_nodes(stations.len());

    for LineSegment { line, row } in segments {
        let start = stations.resolve(&row.start, line)?;
        let end = stations.resolve(&row.end, line)?;

        let attributes = EdgeAttributes {
            weight: row.time,
            color: colours.colour(line)?.to_owned(),
            line: line.clone(),
        };

        if row.directed {
            graph.add_edge(start, end, attributes);
        } else {
            graph.add_edge(start, end, attributes.clone());
            graph.add_edge(end, start, attributes);
        }
    }

    Ok(graph)
}

pub fn edge_metadata(graph: &MultiDiGraph) -> (Vec<Time>, Vec<String>) {
    graph
        .edges()
        .map(|edge| (edge.attributes.weight, edge.attributes.color.clone()))
        .unzip()
}

pub fn load_positions(
    path: &Path,
    stations: &Stations,
) -> Result<BTreeMap<StationIndex, Position>, LoadError> {
    let table = path.display().to_string();

    sheets::deserialize_into::<CoordinateRow>(path)?
        .into_iter()
        .map(|row| {
            let index = stations.resolve(&row.station, &table)?;
            Ok((index, row.point.parse::<Position>()?))
        })
        .collect()
}
