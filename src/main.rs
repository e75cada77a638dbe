use itertools::Itertools;
use std::{env, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_graph::{load_graph, LineColours, LoadError, LoaderConfig};

const COLOURS_TABLE: &str = "Line Colours";

fn run(root: PathBuf, extension: &str) -> Result<(), LoadError> {
    info!(root = %root.display(), extension, "Processing line colours");
    let colours = LineColours::from_path(&root.join(format!("{COLOURS_TABLE}.{extension}")))?;

    info!("Processing network");
    let network = load_graph(
        &LoaderConfig::in_dir_with_extension(&root, extension),
        &colours,
    )?;

    info!(
        stations = network.index_to_name.len(),
        edges = network.graph.edge_count(),
        positions = network.positions.len(),
        "Loaded network"
    );

    for (line, arcs) in network
        .graph
        .edges()
        .map(|edge| edge.attributes.line.as_str())
        .counts()
        .into_iter()
        .sorted()
    {
        info!(line = colours.display_name_or_line(line), arcs, "Line");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let root = env::var_os("TRANSIT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let extension = env::var("TRANSIT_TABLE_EXTENSION").unwrap_or_else(|_| "xlsx".to_string());

    match run(root, &extension) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match std::error::Error::source(&err) {
                Some(cause) => error!(error = %err, %cause, "Failed to load network"),
                None => error!(error = %err, "Failed to load network"),
            }
            ExitCode::FAILURE
        }
    }
}
