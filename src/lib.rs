pub mod bundler;
pub mod config;
pub mod directives;
pub mod errors;
pub mod graph;
pub mod resolution;
