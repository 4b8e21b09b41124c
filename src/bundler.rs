use std::collections::{HashMap, HashSet};
use std::fs;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::DepchainConfig;
use crate::directives;
use crate::errors::{DepchainError, Result};
use crate::graph::DepGraph;
use crate::resolution::PathResolver;

/// Central orchestrator for one resolution run.
///
/// Owns the dependency graph, the content cache, and the scanned set; all
/// three grow monotonically for the lifetime of the instance and nothing is
/// shared across runs. Callers needing parallel resolution use independent
/// `Bundler` instances.
pub struct Bundler {
    resolver: PathResolver,
    graph: DepGraph,
    /// Content cache: file identity -> content, populated on first read.
    contents: HashMap<String, String>,
    /// Identities in first-read order; dependency matching prefers files
    /// that were already read, in this order.
    read_order: Vec<String>,
    /// Identities already passed through `scan`.
    scanned: HashSet<String>,
}

/// One entry of a file chain: a file identity paired with its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleFile {
    /// Caller-supplied file identity.
    pub path: String,
    /// Cached file content.
    pub content: String,
}

/// Returns the directory part of an identity, `"."` if it has none.
fn dirname(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir.to_string(),
        Some(_) => "/".to_string(),
        None => ".".to_string(),
    }
}

/// Returns the final segment of an identity.
fn basename(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl Bundler {
    /// Creates a bundler from a configuration, registering its extensions
    /// and appending its load paths in order.
    ///
    /// Extensions are registered front-first, so the last extension listed
    /// in the configuration is probed first.
    pub fn new(config: &DepchainConfig) -> Self {
        let mut resolver = PathResolver::new();
        for ext in &config.extensions {
            resolver.add_extension(ext);
        }
        for path in &config.load_paths {
            resolver.append_path(path);
        }

        Self {
            resolver,
            graph: DepGraph::new(),
            contents: HashMap::new(),
            read_order: Vec::new(),
            scanned: HashSet::new(),
        }
    }

    /// Creates a bundler that processes files with the given extensions and
    /// has no load paths yet.
    pub fn with_extensions(extensions: &[&str]) -> Self {
        Self::new(&DepchainConfig {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            load_paths: Vec::new(),
        })
    }

    /// Inserts a load path at the front of the search list.
    pub fn prepend_load_path(&mut self, path: &str) {
        self.resolver.prepend_path(path);
    }

    /// Inserts a load path at the back of the search list.
    pub fn append_load_path(&mut self, path: &str) {
        self.resolver.append_path(path);
    }

    /// Returns the registered extensions, most recently added first.
    pub fn registered_extensions(&self) -> &[String] {
        self.resolver.extensions()
    }

    /// Returns `true` if the file identity has already been scanned.
    pub fn scanned(&self, file_id: &str) -> bool {
        self.scanned.contains(file_id)
    }
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

impl Bundler {
    /// Scans a file, recording graph edges for every directive reference and
    /// recursing into each discovered dependency.
    ///
    /// Returns `false` without side effects if the file was already scanned.
    /// Unknown directive commands are ignored. Cycles do not fail here; they
    /// surface at chain extraction.
    pub fn scan(&mut self, file_id: &str) -> Result<bool> {
        if self.scanned.contains(file_id) {
            return Ok(false);
        }
        self.scanned.insert(file_id.to_string());

        debug!(file = file_id, "scanning");
        let content = self.content(file_id)?;
        let dir = dirname(file_id);

        let header = directives::extract_header(&content);
        for directive in directives::parse_directives(&header) {
            let words = directives::tokenize(&directive);
            let Some((command, refs)) = words.split_first() else {
                continue;
            };

            match command.as_str() {
                "require" => {
                    for reference in refs {
                        self.require(reference, file_id, None)?;
                    }
                }
                "require_directory" => {
                    for reference in refs {
                        let dir_name = PathResolver::join(&[dir.as_str(), reference.as_str()]);
                        self.require_directory(&dir_name, file_id, false)?;
                    }
                }
                "require_tree" => {
                    for reference in refs {
                        let dir_name = PathResolver::join(&[dir.as_str(), reference.as_str()]);
                        self.require_directory(&dir_name, file_id, true)?;
                    }
                }
                other => {
                    debug!(file = file_id, command = other, "ignoring unknown directive");
                }
            }
        }

        Ok(true)
    }

    /// Handles one `require` reference.
    ///
    /// The reference is stripped of a known extension, resolved to a
    /// dependency identity, and normalized. The edge's dependent is
    /// `key_path` when given (directory requires), otherwise the referencing
    /// file. A dependency whose extension is not registered is skipped
    /// silently.
    fn require(&mut self, rel_path: &str, file_id: &str, key_path: Option<&str>) -> Result<()> {
        let rel_name = self.resolver.strip_known_extension(rel_path);

        let dep_path = if PathResolver::is_explicit(&rel_name) {
            self.resolver.resolve_with_extensions(&rel_name)?
        } else {
            let dep_name = PathResolver::join(&[dirname(file_id).as_str(), rel_name.as_str()]);
            self.find_matching_file(&dep_name)?
        };

        let dep_path = PathResolver::normalize(&dep_path);

        let ext = PathResolver::extension(&dep_path);
        if !self.resolver.extensions().iter().any(|e| e == ext) {
            trace!(path = %dep_path, "skipping file with unregistered extension");
            return Ok(());
        }

        let dependent = key_path.unwrap_or(file_id);
        self.graph.add_edge(dependent, &dep_path);
        self.scan(&dep_path)?;

        Ok(())
    }

    /// Handles one `require_directory` / `require_tree` target.
    ///
    /// Enumerates the directory's files in lexical order (recursing into
    /// subdirectories when `recursive`), skipping the referencing file
    /// itself, and requires each entry with `file_id` as the edge's
    /// dependent. Failing to resolve the directory itself is fatal.
    fn require_directory(&mut self, dir_name: &str, file_id: &str, recursive: bool) -> Result<()> {
        let dir_path = self.resolver.resolve(dir_name)?;
        let abs_file = self.resolver.resolve(file_id)?;

        let walker = WalkDir::new(&dir_path).min_depth(1).sort_by_file_name();
        let walker = if recursive { walker } else { walker.max_depth(1) };

        for entry in walker.into_iter().filter_entry(|e| {
            // Skip hidden entries, but never prune the walk root itself.
            e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
        }) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&dir_path)
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            let item_path = PathResolver::join(&[dir_name, rel.as_str()]);

            let full = self.resolver.resolve(&item_path)?;
            if PathResolver::same_file(&full, &abs_file) {
                continue;
            }

            self.require(&basename(&item_path), &item_path, Some(file_id))?;
        }

        Ok(())
    }

    /// Resolves a bare dependency name to the identity of an existing file.
    ///
    /// The name is expanded through extension probing, then matched back to
    /// an identity: first against already-read files, then against the
    /// resolved directory's entries joined onto the referencing directory.
    fn find_matching_file(&self, name: &str) -> Result<String> {
        let abs = self.resolver.resolve_with_extensions(name)?;

        if let Some(id) = self.try_files(&abs, &self.read_order) {
            return Ok(id);
        }

        let entries = PathResolver::list_entries(&dirname(&abs), true)?;
        let dir_name = dirname(name);
        let candidates: Vec<String> = entries
            .iter()
            .map(|entry| PathResolver::join(&[dir_name.as_str(), entry.as_str()]))
            .collect();

        self.try_files(&abs, &candidates)
            .ok_or_else(|| DepchainError::NotFound {
                path: name.to_string(),
            })
    }

    /// Returns the first candidate identity that resolves to `abs`.
    fn try_files(&self, abs: &str, candidates: &[String]) -> Option<String> {
        for candidate in candidates {
            if let Ok(full) = self.resolver.resolve(candidate) {
                if full == abs {
                    return Some(candidate.clone());
                }
            }
        }

        None
    }

    /// Reads a file's content through the resolver, caching it under the
    /// caller-supplied identity. The cache is immutable for the lifetime of
    /// the run.
    fn content(&mut self, file_id: &str) -> Result<String> {
        let full = self.resolver.resolve(file_id)?;

        if !self.contents.contains_key(file_id) {
            let text = fs::read_to_string(&full)?;
            self.contents.insert(file_id.to_string(), text);
            self.read_order.push(file_id.to_string());
        }

        Ok(self.contents[file_id].clone())
    }
}

// ---------------------------------------------------------------------------
// Chain queries
// ---------------------------------------------------------------------------

impl Bundler {
    /// Returns the ordered transitive dependencies of a previously scanned
    /// file, dependencies before dependents, excluding the file itself.
    ///
    /// Fails with `NotScanned` for a file never passed to `scan`, and may
    /// propagate `CyclicDependency` from chain extraction.
    pub fn get_chain(&self, file_id: &str) -> Result<Vec<String>> {
        if !self.scanned.contains(file_id) {
            return Err(DepchainError::NotScanned {
                path: file_id.to_string(),
            });
        }

        self.graph.chain(file_id)
    }

    /// Returns the chain with each identity paired with its cached content,
    /// plus the file itself last.
    pub fn get_file_chain(&mut self, file_id: &str) -> Result<Vec<BundleFile>> {
        let chain = self.get_chain(file_id)?;

        let mut result = Vec::with_capacity(chain.len() + 1);
        for dep in &chain {
            result.push(BundleFile {
                path: dep.clone(),
                content: self.content(dep)?,
            });
        }

        result.push(BundleFile {
            path: file_id.to_string(),
            content: self.content(file_id)?,
        });

        Ok(result)
    }
}
