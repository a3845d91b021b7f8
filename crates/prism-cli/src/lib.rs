//! CLI for the Prism content-analysis service.

pub mod cli;
pub mod commands;
