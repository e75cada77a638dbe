use std::path::PathBuf;

use thiserror::Error;

use crate::data::StationIndex;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse table {path:?}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read workbook {path:?}")]
    Sheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook {path:?} has no sheets")]
    EmptyWorkbook { path: PathBuf },

    #[error("No such Station {station:?} referenced from {table}")]
    UnknownStation { station: String, table: String },

    #[error("Station {station:?} listed twice, at rows {first} and {second}")]
    DuplicateStation {
        station: String,
        first: StationIndex,
        second: StationIndex,
    },

    #[error("Malformed point {text:?}, expected \"TAG (x y)\"")]
    MalformedPoint { text: String },

    #[error("No colour defined for Line {line:?}")]
    UnknownLine { line: String },

    #[error("Line file {path:?} has no usable name")]
    InvalidLineFileName { path: PathBuf },
}
