// src/data_analysis/summary.rs

use crate::data_analysis::outliers::{count_outliers, series_stats, SeriesStats};
use crate::data_input::sensor_data::SensorFrame;

/// Per-column statistics for the console summary.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub stats: Option<SeriesStats>,
    pub missing: usize,
    pub outliers: usize,
}

pub fn summarize_frame(frame: &SensorFrame) -> Vec<ColumnSummary> {
    frame
        .columns
        .iter()
        .map(|column| ColumnSummary {
            name: column.name.clone(),
            stats: series_stats(&column.values),
            missing: column.values.iter().filter(|v| !v.is_finite()).count(),
            outliers: count_outliers(&column.values),
        })
        .collect()
}

/// Fixed-width table, one line per column.
pub fn format_summary_table(summaries: &[ColumnSummary]) -> String {
    let mut out = format!(
        "{:<10} {:>8} {:>8} {:>12} {:>12} {:>12} {:>12} {:>9}\n",
        "column", "samples", "missing", "mean", "std", "min", "max", "outliers"
    );
    for summary in summaries {
        match &summary.stats {
            Some(stats) => {
                let std = stats
                    .std_dev
                    .map(|s| format!("{s:.3}"))
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "{:<10} {:>8} {:>8} {:>12.3} {:>12} {:>12.3} {:>12.3} {:>9}\n",
                    summary.name,
                    stats.count,
                    summary.missing,
                    stats.mean,
                    std,
                    stats.min,
                    stats.max,
                    summary.outliers
                ));
            }
            None => out.push_str(&format!(
                "{:<10} {:>8} {:>8} {:>12} {:>12} {:>12} {:>12} {:>9}\n",
                summary.name, 0, summary.missing, "-", "-", "-", "-", 0
            )),
        }
    }
    out
}
