// src/plot_framework.rs

use chrono::{Duration, NaiveDateTime};
use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;
use tracing::info;

use crate::constants::{
    FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, MULTI_DAY_SPAN_S, PLOT_WIDTH, ROW_HEIGHT,
    TITLE_BAND_HEIGHT,
};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MAIN_TITLE,
    FONT_TUPLE_MESSAGE,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Y-axis tick label with "k" and "M" notation for large values and one
/// decimal for small fractional values.
pub fn format_y_axis_label(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1000.0 {
        format!("{:.0}k", y / 1000.0)
    } else if y.abs() < 10.0 && y.fract() != 0.0 {
        format!("{:.1}", y)
    } else {
        format!("{:.0}", y)
    }
}

/// X-axis tick label: the wall-clock time `offset_s` seconds after `start`.
/// Spans longer than a day include the date.
pub fn format_time_label(start: NaiveDateTime, offset_s: f64, span_s: f64) -> String {
    let micros = (offset_s * 1_000_000.0).round() as i64;
    let instant = start + Duration::microseconds(micros);
    if span_s > MULTI_DAY_SPAN_S {
        instant.format("%m-%d %H:%M").to_string()
    } else {
        instant.format("%H:%M:%S").to_string()
    }
}

/// Total image height for a figure with `rows` stacked subplots.
pub fn figure_height(rows: usize) -> u32 {
    TITLE_BAND_HEIGHT + ROW_HEIGHT * rows.max(1) as u32
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message<DB>(
    area: &DrawingArea<DB, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    // Constants for text rendering
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4; // Additional spacing between lines

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let mut line_y = height as i32 / 2 - (lines.len() as i32 * estimated_line_height) / 2;

    // Drawn line by line; not every backend honours embedded newlines.
    for line in lines {
        let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
        area.draw(&Text::new(line.to_string(), (center_x, line_y), text_style))?;
        line_y += estimated_line_height;
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

#[derive(Clone, Debug)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

/// Time axis shared by every subplot of a stacked figure.
#[derive(Clone, Copy, Debug)]
pub struct TimeAxis {
    pub start: NaiveDateTime,
    pub span_s: f64,
    /// Only the bottom subplot carries tick labels and the axis description.
    pub show_labels: bool,
}

/// Draws a single chart from a PlotConfig.
///
/// Series with no data but a label become legend-only entries.
pub fn draw_single_chart<DB>(
    area: &DrawingArea<DB, Shift>,
    plot_config: &PlotConfig,
    time_axis: &TimeAxis,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(5)
        .x_label_area_size(if time_axis.show_labels { 50 } else { 10 })
        .y_label_area_size(60)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    let x_formatter = |x: &f64| format_time_label(time_axis.start, *x, time_axis.span_s);
    let y_formatter = |y: &f64| format_y_axis_label(*y);

    {
        let mut mesh = chart.configure_mesh();
        mesh.y_desc(&plot_config.y_label)
            .x_labels(if time_axis.show_labels { 12 } else { 0 })
            .y_labels(8)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .light_line_style(WHITE.mix(0.7))
            .label_style(FONT_TUPLE_AXIS_LABEL);
        if time_axis.show_labels {
            mesh.x_desc(&plot_config.x_label);
        }
        mesh.draw()?;
    }

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        if s.data.is_empty() {
            if !s.label.is_empty() {
                // Invisible point carrying a legend entry for a hidden series
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (plot_config.x_range.start, plot_config.y_range.start),
                        0,
                        s.color.filled(),
                    )))?
                    .label(&s.label)
                    .legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            s.color.mix(0.35).stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                legend_series_count += 1;
            }
            continue;
        }

        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;

        if !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    s.color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    Ok(())
}

/// One row of a stacked figure: a chart, or the reason it cannot be drawn.
#[derive(Clone, Debug)]
pub enum StackedRow {
    Chart(PlotConfig),
    Unavailable { plot_type: String, reason: String },
}

/// Draws a title band and `rows` stacked vertically on `root_area`.
///
/// Returns whether at least one row was drawn as a chart.
pub fn draw_stacked_rows<DB>(
    root_area: &DrawingArea<DB, Shift>,
    title: &str,
    rows: &[StackedRow],
    start: NaiveDateTime,
    span_s: f64,
) -> Result<bool, Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        title.to_string(),
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(TITLE_BAND_HEIGHT, 5, 5, 5);

    if rows.is_empty() {
        draw_unavailable_message(&margined_root_area, "Signal", "No signal types selected")?;
        return Ok(false);
    }

    let sub_plot_areas = margined_root_area.split_evenly((rows.len(), 1));
    let last_chart_row = rows
        .iter()
        .rposition(|row| matches!(row, StackedRow::Chart(_)));
    let mut any_row_plotted = false;

    for (row_index, (row, area)) in rows.iter().zip(sub_plot_areas.iter()).enumerate() {
        match row {
            StackedRow::Chart(plot_config) => {
                let has_data = plot_config.series.iter().any(|s| !s.data.is_empty());
                let valid_ranges = plot_config.x_range.end > plot_config.x_range.start
                    && plot_config.y_range.end > plot_config.y_range.start;
                if valid_ranges {
                    let time_axis = TimeAxis {
                        start,
                        span_s,
                        show_labels: Some(row_index) == last_chart_row,
                    };
                    draw_single_chart(area, plot_config, &time_axis)?;
                    any_row_plotted |= has_data;
                } else {
                    draw_unavailable_message(area, &plot_config.title, "Invalid ranges")?;
                }
            }
            StackedRow::Unavailable { plot_type, reason } => {
                draw_unavailable_message(area, plot_type, reason)?;
            }
        }
    }

    Ok(any_row_plotted)
}

/// Renders stacked rows to a PNG file.
pub fn render_png(
    output_path: &Path,
    title: &str,
    rows: &[StackedRow],
    start: NaiveDateTime,
    span_s: f64,
) -> Result<(), Box<dyn Error>> {
    let size = (PLOT_WIDTH, figure_height(rows.len()));
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    let plotted = draw_stacked_rows(&root_area, title, rows, start, span_s)?;
    root_area.present()?;
    log_saved(output_path, plotted);
    Ok(())
}

/// Renders stacked rows to an SVG file.
pub fn render_svg_file(
    output_path: &Path,
    title: &str,
    rows: &[StackedRow],
    start: NaiveDateTime,
    span_s: f64,
) -> Result<(), Box<dyn Error>> {
    let size = (PLOT_WIDTH, figure_height(rows.len()));
    let root_area = SVGBackend::new(output_path, size).into_drawing_area();
    let plotted = draw_stacked_rows(&root_area, title, rows, start, span_s)?;
    root_area.present()?;
    log_saved(output_path, plotted);
    Ok(())
}

/// Renders stacked rows to an in-memory SVG document.
pub fn render_svg_string(
    title: &str,
    rows: &[StackedRow],
    start: NaiveDateTime,
    span_s: f64,
) -> Result<String, Box<dyn Error>> {
    let size = (PLOT_WIDTH, figure_height(rows.len()));
    let mut svg = String::new();
    {
        let root_area = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_stacked_rows(&root_area, title, rows, start, span_s)?;
        root_area.present()?;
    }
    Ok(svg)
}

fn log_saved(output_path: &Path, plotted: bool) {
    if plotted {
        info!("  Stacked plot saved as '{}'.", output_path.display());
    } else {
        info!(
            "  Plot '{}' saved with placeholder messages only: no data available to plot.",
            output_path.display()
        );
    }
}
