use std::{collections::HashMap, path::Path};

use crate::{
    error::LoadError,
    sheets::{self, ColourRow},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStyle {
    pub colour: String,
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct LineColours(HashMap<String, LineStyle>);

impl LineColours {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self(
            sheets::deserialize_into::<ColourRow>(path)?
                .into_iter()
                .map(|row| {
                    (
                        row.line,
                        LineStyle {
                            colour: row.colour,
                            name: row.name,
                        },
                    )
                })
                .collect(),
        ))
    }

    pub fn insert(&mut self, line: impl Into<String>, colour: impl Into<String>) {
        self.0.insert(
            line.into(),
            LineStyle {
                colour: colour.into(),
                name: None,
            },
        );
    }

    pub fn colour(&self, line: &str) -> Result<&str, LoadError> {
        self.0
            .get(line)
            .map(|style| style.colour.as_str())
            .ok_or_else(|| LoadError::UnknownLine {
                line: line.to_owned(),
            })
    }

    pub fn display_name(&self, line: &str) -> Option<&str> {
        self.0.get(line)?.name.as_deref()
    }

    pub fn display_name_or_line<'a>(&'a self, line: &'a str) -> &'a str {
        self.display_name(line).unwrap_or(line)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>, C: Into<String>> FromIterator<(L, C)> for LineColours {
    fn from_iter<T: IntoIterator<Item = (L, C)>>(iter: T) -> Self {
        let mut colours = Self::default();
        for (line, colour) in iter {
            colours.insert(line, colour);
        }
        colours
    }
}
