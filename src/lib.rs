//! Assembles a transit network from its station, line and coordinate tables
//! into a directed multigraph ready for layout and path analysis.

pub mod colours;
pub mod data;
pub mod error;
pub mod graph;
pub mod loader;
pub mod sheets;

pub use colours::LineColours;
pub use data::{Edge, EdgeAttributes, Position, StationIndex, Stations, Time};
pub use error::LoadError;
pub use graph::MultiDiGraph;
pub use loader::{load_graph, LoadedNetwork, LoaderConfig};
