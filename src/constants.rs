// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREEN, RED};
use plotters::style::RGBColor;

// Plot dimensions. Height grows with the number of stacked subplots.
pub const PLOT_WIDTH: u32 = 1600;
pub const ROW_HEIGHT: u32 = 360;
pub const TITLE_BAND_HEIGHT: u32 = 50;

// Font sizes.
pub const FONT_SIZE_MAIN_TITLE: i32 = 28;
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 16;
pub const FONT_SIZE_MESSAGE: i32 = 22;

// Samples further than this many standard deviations from the mean are outliers.
pub const OUTLIER_STD_THRESHOLD: f64 = 3.0;

// Spans longer than this switch the time axis from clock time to date + time.
pub const MULTI_DAY_SPAN_S: f64 = 86_400.0;

// Input defaults.
pub const DEFAULT_CSV_PATH: &str = "./data/raw/output.csv";
pub const DAY_COLUMN: &str = "day";
pub const TIME_COLUMN: &str = "time";

// --- Plot Color Assignments ---
pub const COLOR_PHASE_1: &RGBColor = &RED;
pub const COLOR_PHASE_2: &RGBColor = &BLUE;
pub const COLOR_PHASE_3: &RGBColor = &GREEN;

// Dashboard banner colour.
pub const BANNER_COLOR_HEX: &str = "#005499";

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 3;

// src/constants.rs
