use std::collections::{HashMap, HashSet};

use crate::errors::{DepchainError, Result};

/// Directed graph of file identities.
///
/// An edge dependent -> dependency means the dependent requires the
/// dependency, so the dependency must be emitted first. Edges are only ever
/// added during a run; adjacency lists preserve insertion order so chain
/// extraction is deterministic for a fixed directive order.
#[derive(Debug, Default)]
pub struct DepGraph {
    edges: HashMap<String, Vec<String>>,
}

impl DepGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `dependent` requires `dependency`.
    ///
    /// Re-adding an existing edge is a no-op.
    pub fn add_edge(&mut self, dependent: &str, dependency: &str) {
        let deps = self.edges.entry(dependent.to_string()).or_default();
        if !deps.iter().any(|d| d == dependency) {
            deps.push(dependency.to_string());
        }
    }

    /// Returns the direct dependencies of a node, in edge-insertion order.
    pub fn dependencies(&self, node: &str) -> &[String] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns every node transitively reachable from `start`, ordered so
    /// that dependencies precede their dependents. `start` itself is
    /// excluded.
    ///
    /// Implemented as a postorder DFS with three-coloring: an `active` set
    /// marks nodes on the current recursion stack and a `done` set marks
    /// fully emitted nodes. Reaching an `active` node is a back-edge and
    /// fails with `CyclicDependency` naming the participants; reaching a
    /// `done` node (diamond re-convergence) is skipped silently.
    pub fn chain(&self, start: &str) -> Result<Vec<String>> {
        let mut active: HashSet<String> = HashSet::new();
        let mut done: HashSet<String> = HashSet::new();
        let mut stack: Vec<String> = Vec::new();
        let mut result: Vec<String> = Vec::new();

        active.insert(start.to_string());
        stack.push(start.to_string());
        self.visit(start, &mut active, &mut done, &mut stack, &mut result)?;

        Ok(result)
    }

    /// Visits each direct dependency of `node`, recursing before appending
    /// the dependency to `result`.
    fn visit(
        &self,
        node: &str,
        active: &mut HashSet<String>,
        done: &mut HashSet<String>,
        stack: &mut Vec<String>,
        result: &mut Vec<String>,
    ) -> Result<()> {
        for dep in self.dependencies(node) {
            if done.contains(dep) {
                continue;
            }

            if active.contains(dep) {
                let mut participants = stack.clone();
                participants.push(dep.clone());
                return Err(DepchainError::CyclicDependency { participants });
            }

            active.insert(dep.clone());
            stack.push(dep.clone());
            self.visit(dep, active, done, stack, result)?;
            stack.pop();
            active.remove(dep);

            done.insert(dep.clone());
            result.push(dep.clone());
        }

        Ok(())
    }
}
