// src/data_analysis/mod.rs

pub mod column_filter;
pub mod outliers;
pub mod selection;
pub mod summary;

// src/data_analysis/mod.rs
