// src/data_input/mod.rs

pub mod trace_data;
pub mod trace_parser;
