// src/plot_functions/mod.rs

pub mod plot_bode;
pub mod plot_scope_channels;

// src/plot_functions/mod.rs
