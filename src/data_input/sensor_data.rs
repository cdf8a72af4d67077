// src/data_input/sensor_data.rs

use chrono::NaiveDateTime;

use crate::signal_names::{Phase, SignalType};

/// One value column of the sensor log.
/// Missing or unparseable cells are stored as `NaN`.
#[derive(Debug, Clone)]
pub struct SignalColumn {
    pub name: String,
    pub phase: Phase,
    pub signal_type: SignalType,
    pub values: Vec<f64>,
}

/// The loaded sensor log: a timestamp index plus the phase signal columns.
#[derive(Debug, Clone, Default)]
pub struct SensorFrame {
    pub timestamps: Vec<NaiveDateTime>,
    pub columns: Vec<SignalColumn>,
}

impl SensorFrame {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamp of the first row, used as the origin of the time axis.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }

    /// Seconds elapsed since the first row, one entry per row.
    pub fn time_offsets_secs(&self) -> Vec<f64> {
        let Some(start) = self.start() else {
            return Vec::new();
        };
        self.timestamps
            .iter()
            .map(|t| (*t - start).num_microseconds().unwrap_or(0) as f64 / 1_000_000.0)
            .collect()
    }

    /// Earliest and latest offset in seconds. Rows need not be sorted.
    pub fn time_span_secs(&self) -> Option<(f64, f64)> {
        let offsets = self.time_offsets_secs();
        if offsets.is_empty() {
            return None;
        }
        Some(offsets.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min_t, max_t), t| (min_t.min(*t), max_t.max(*t)),
        ))
    }

    pub fn column(&self, name: &str) -> Option<&SignalColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}
