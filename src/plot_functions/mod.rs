// src/plot_functions/mod.rs

pub mod plot_phase_signals;

// src/plot_functions/mod.rs
