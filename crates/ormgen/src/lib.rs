//! Command-line front end for `ormgen-typegen`.

pub mod cli;
pub mod config;
