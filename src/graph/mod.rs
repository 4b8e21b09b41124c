/// Directed dependency graph with cycle-checked chain extraction.
mod depgraph;

pub use depgraph::DepGraph;
