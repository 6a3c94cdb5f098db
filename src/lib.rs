// src/lib.rs - Library interface shared by the batch and Bode binaries

pub mod batch;
pub mod cli;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;
