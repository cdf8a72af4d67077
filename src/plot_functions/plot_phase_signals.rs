// src/plot_functions/plot_phase_signals.rs

use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::error::Error;
use std::path::Path;
use tracing::debug;

use crate::constants::LINE_WIDTH_PLOT;
use crate::data_analysis::column_filter::filter_columns_by_type;
use crate::data_analysis::outliers::{filter_outliers, series_stats};
use crate::data_analysis::selection::{OutlierMode, TypeSelection};
use crate::data_input::sensor_data::SensorFrame;
use crate::plot_framework::{
    calculate_range, render_png, render_svg_file, render_svg_string, PlotConfig, PlotSeries,
    StackedRow,
};
use crate::signal_names::{Phase, SignalType};

/// One subplot of the phase figure: every selected column of a single signal type.
#[derive(Debug, Clone)]
pub struct SignalSubplot {
    pub signal_type: SignalType,
    pub series: Vec<PhaseTrace>,
}

/// A single phase line within a subplot.
#[derive(Debug, Clone)]
pub struct PhaseTrace {
    pub column: String,
    pub phase: Phase,
    pub points: Vec<(f64, f64)>,
    /// All-zero series start hidden and are never drawn.
    pub visible: bool,
    /// Only the first trace of each phase carries a legend entry, hidden or not.
    pub show_legend: bool,
}

impl PhaseTrace {
    pub fn legend_label(&self) -> String {
        match (self.show_legend, self.visible) {
            (false, _) => String::new(),
            (true, true) => self.phase.legend_name(),
            (true, false) => format!("{} (all zero)", self.phase.legend_name()),
        }
    }
}

/// The complete figure: subplots in selection order on a shared time axis.
#[derive(Debug, Clone)]
pub struct PhaseFigure {
    pub start: NaiveDateTime,
    pub x_range: (f64, f64),
    pub subplots: Vec<SignalSubplot>,
}

impl PhaseFigure {
    pub fn span_s(&self) -> f64 {
        self.x_range.1 - self.x_range.0
    }

    pub fn subplot(&self, signal_type: SignalType) -> Option<&SignalSubplot> {
        self.subplots.iter().find(|s| s.signal_type == signal_type)
    }

    /// Converts the figure into drawable rows for the plot framework.
    pub fn stacked_rows(&self) -> Vec<StackedRow> {
        self.subplots
            .iter()
            .map(|subplot| {
                let title = subplot.signal_type.subplot_title();
                if subplot.series.is_empty() {
                    return StackedRow::Unavailable {
                        plot_type: title,
                        reason: "No matching columns".to_string(),
                    };
                }

                let (val_min, val_max) = subplot
                    .series
                    .iter()
                    .filter(|t| t.visible)
                    .flat_map(|t| t.points.iter())
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(min_v, max_v), (_, v)| {
                        (min_v.min(*v), max_v.max(*v))
                    });
                let (y_min, y_max) = if val_min.is_finite() && val_max.is_finite() {
                    calculate_range(val_min, val_max)
                } else {
                    calculate_range(0.0, 0.0)
                };

                let series = subplot
                    .series
                    .iter()
                    .map(|trace| PlotSeries {
                        data: if trace.visible { trace.points.clone() } else { Vec::new() },
                        label: trace.legend_label(),
                        color: trace.phase.color(),
                        stroke_width: LINE_WIDTH_PLOT,
                    })
                    .collect();

                StackedRow::Chart(PlotConfig {
                    title,
                    x_range: self.x_range.0..self.x_range.1,
                    y_range: y_min..y_max,
                    series,
                    x_label: "Time".to_string(),
                    y_label: subplot.signal_type.label().to_string(),
                })
            })
            .collect()
    }
}

/// Builds the stacked phase figure for the chosen signal types.
///
/// One subplot per selected type in selection order; one line per column,
/// coloured by phase. With `OutlierMode::Remove` each column is passed
/// through the 3-sigma outlier filter first. Returns `None` for an empty frame.
pub fn build_phase_figure(
    frame: &SensorFrame,
    selection: &TypeSelection,
    outlier_mode: OutlierMode,
) -> Option<PhaseFigure> {
    let start = frame.start()?;
    let (t_min, t_max) = frame.time_span_secs()?;
    let x_range = if t_max - t_min < 1e-6 {
        calculate_range(t_min, t_max)
    } else {
        (t_min, t_max)
    };
    let offsets = frame.time_offsets_secs();

    let mut subplots: Vec<SignalSubplot> = selection
        .types()
        .iter()
        .map(|signal_type| SignalSubplot {
            signal_type: *signal_type,
            series: Vec::new(),
        })
        .collect();

    let mut legend_phases: HashSet<Phase> = HashSet::new();

    for column in filter_columns_by_type(frame, selection) {
        let Some(row_num) = selection.position(column.signal_type) else {
            continue;
        };

        let raw_points: Vec<(f64, f64)> = offsets
            .iter()
            .zip(column.values.iter())
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| (*t, *v))
            .collect();
        let points = if outlier_mode.removes_outliers() {
            let filtered = filter_outliers(&raw_points);
            debug!(
                "{}: removed {} outliers",
                column.name,
                raw_points.len() - filtered.len()
            );
            filtered
        } else {
            raw_points
        };

        let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
        let visible = series_stats(&values).is_some_and(|stats| !stats.is_all_zero());
        let show_legend = legend_phases.insert(column.phase);

        subplots[row_num].series.push(PhaseTrace {
            column: column.name.clone(),
            phase: column.phase,
            points,
            visible,
            show_legend,
        });
    }

    Some(PhaseFigure {
        start,
        x_range,
        subplots,
    })
}

/// Title drawn above the stacked subplots.
pub fn figure_title(root_name: &str, outlier_mode: OutlierMode) -> String {
    match outlier_mode {
        OutlierMode::Include => format!("Three Phase Sensor: {root_name}"),
        OutlierMode::Remove => format!("Three Phase Sensor: {root_name} (outliers removed)"),
    }
}

/// Generates the stacked phase plot and writes it to `output_path`.
/// The extension picks the backend: `.svg` for SVG, anything else for PNG.
pub fn plot_phase_signals(
    frame: &SensorFrame,
    selection: &TypeSelection,
    outlier_mode: OutlierMode,
    root_name: &str,
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let figure = build_phase_figure(frame, selection, outlier_mode)
        .ok_or("No valid data rows read, cannot generate plots.")?;
    let title = figure_title(root_name, outlier_mode);
    let rows = figure.stacked_rows();

    let is_svg = output_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        render_svg_file(output_path, &title, &rows, figure.start, figure.span_s())
    } else {
        render_png(output_path, &title, &rows, figure.start, figure.span_s())
    }
}

/// Renders the stacked phase plot to an SVG document in memory.
pub fn phase_signals_svg(
    frame: &SensorFrame,
    selection: &TypeSelection,
    outlier_mode: OutlierMode,
    root_name: &str,
) -> Result<String, Box<dyn Error>> {
    let figure = build_phase_figure(frame, selection, outlier_mode)
        .ok_or("No valid data rows read, cannot generate plots.")?;
    let title = figure_title(root_name, outlier_mode);
    render_svg_string(&title, &figure.stacked_rows(), figure.start, figure.span_s())
}

// src/plot_functions/plot_phase_signals.rs
