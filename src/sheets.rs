use std::{ffi::OsStr, fmt, path::Path};

use calamine::{open_workbook_auto, Data, RangeDeserializer, RangeDeserializerBuilder, Reader};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};

use crate::error::LoadError;

#[derive(Deserialize, Debug)]
pub struct StationRow {
    #[serde(rename = "Station")]
    pub station: String,
}

#[derive(Deserialize, Debug)]
pub struct SegmentRow {
    #[serde(rename = "Start")]
    pub start: String,
    #[serde(rename = "End")]
    pub end: String,
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "Directed", deserialize_with = "directed_flag")]
    pub directed: bool,
}

#[derive(Debug)]
pub struct LineSegment {
    pub line: String,
    pub row: SegmentRow,
}

#[derive(Deserialize, Debug)]
pub struct CoordinateRow {
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Point")]
    pub point: String,
}

#[derive(Deserialize, Debug)]
pub struct ColourRow {
    #[serde(rename = "Line")]
    pub line: String,
    #[serde(rename = "Colour")]
    pub colour: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
}

struct DirectedFlagVisitor;

impl<'de> Visitor<'de> for DirectedFlagVisitor {
    type Value = bool;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a directed flag")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        Ok(v == 1)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        Ok(v == 1)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
        Ok(v == 1.0)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        let v = v.trim();
        Ok(v.eq_ignore_ascii_case("true") || v.parse::<f64>().is_ok_and(|n| n == 1.0))
    }

    fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_none<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// `1`, `1.0` and `true` mark a one-way segment; anything else, blank included, does not.
fn directed_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    deserializer.deserialize_any(DirectedFlagVisitor)
}

/// Reads every row of a table. `.csv` files go through the csv reader, anything
/// else is opened as a workbook and its first sheet is read.
pub fn deserialize_into<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let is_csv = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        deserialize_csv(path)
    } else {
        deserialize_sheet(path)
    }
}

fn deserialize_csv<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let to_error = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(to_error)?
        .deserialize()
        .map(|parse_result| parse_result.map_err(to_error))
        .collect()
}

fn deserialize_sheet<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let to_error = |source: calamine::Error| LoadError::Sheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(to_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(to_error)?;

    let rows: RangeDeserializer<'_, Data, T> = RangeDeserializerBuilder::new()
        .from_range(&range)
        .map_err(|err| to_error(err.into()))?;

    rows.map(|parse_result| parse_result.map_err(|err| to_error(err.into())))
        .collect()
}
