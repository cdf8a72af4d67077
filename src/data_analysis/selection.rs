// src/data_analysis/selection.rs

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::SensorError;
use crate::signal_names::{SignalType, SIGNAL_TYPES};

/// Ordered set of signal types chosen for display.
///
/// The order is kept as given and decides the subplot order;
/// repeated entries are dropped after their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSelection(Vec<SignalType>);

impl TypeSelection {
    pub fn new<I: IntoIterator<Item = SignalType>>(types: I) -> Self {
        let mut selected = Vec::new();
        for t in types {
            if !selected.contains(&t) {
                selected.push(t);
            }
        }
        TypeSelection(selected)
    }

    pub fn types(&self) -> &[SignalType] {
        &self.0
    }

    pub fn contains(&self, signal_type: SignalType) -> bool {
        self.0.contains(&signal_type)
    }

    /// Subplot row for a signal type, if it is selected.
    pub fn position(&self, signal_type: SignalType) -> Option<usize> {
        self.0.iter().position(|t| *t == signal_type)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-separated codes, e.g. "p,q,i,v".
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(|t| t.code().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for TypeSelection {
    fn default() -> Self {
        TypeSelection(SIGNAL_TYPES.to_vec())
    }
}

impl fmt::Display for TypeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_query_value())
    }
}

impl FromStr for TypeSelection {
    type Err = SensorError;

    /// Parses comma-separated codes or labels. An empty string is an empty selection.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let types = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(SignalType::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeSelection::new(types))
    }
}

/// Whether outlying samples are drawn or removed before plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(try_from = "String")]
pub enum OutlierMode {
    #[default]
    Include,
    Remove,
}

impl OutlierMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutlierMode::Include => "include",
            OutlierMode::Remove => "remove",
        }
    }

    pub fn removes_outliers(self) -> bool {
        self == OutlierMode::Remove
    }
}

impl fmt::Display for OutlierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlierMode {
    type Err = SensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(OutlierMode::Include),
            "remove" => Ok(OutlierMode::Remove),
            other => Err(SensorError::UnknownOutlierMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for OutlierMode {
    type Error = SensorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
