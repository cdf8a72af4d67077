// src/lib.rs - Library interface for internal module access

pub mod constants;
pub mod dashboard;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;
pub mod signal_names;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
