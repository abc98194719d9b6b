pub mod cli;
pub mod config;
pub mod obj_scan;
pub mod obj_writer;
