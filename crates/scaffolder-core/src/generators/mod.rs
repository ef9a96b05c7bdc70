//! The generators behind the CLI subcommands
//!
//! Each generator is an explicit sequence of phase functions called in order by
//! its `run` function. Phases return the files they touched; nothing is rolled
//! back when a later phase fails.

pub mod app;
pub mod extension;
