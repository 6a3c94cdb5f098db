// src/data_input/mod.rs

pub mod bode_parser;
pub mod bode_table;
pub mod numeric;
pub mod scope_parser;
pub mod scope_table;

// src/data_input/mod.rs
