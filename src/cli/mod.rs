//! Command line interface: argument parsing and result output

pub mod args;
pub mod output;
