use std::fs;
use std::path::Path;

use tracing::trace;

use crate::errors::{DepchainError, Result};

/// Canonical internal path separator, regardless of host platform.
const SEP: char = '/';

/// Resolves relative references to concrete on-disk paths.
///
/// Holds an ordered list of load paths (earlier entries take precedence) and
/// an ordered list of file extensions (most recently registered first).
/// All paths are handled as plain strings with `/` as the separator; values
/// cross into `std::path` types only at filesystem call sites, so the
/// normalization rules stay portable and testable without touching disk.
pub struct PathResolver {
    load_paths: Vec<String>,
    extensions: Vec<String>,
}

impl PathResolver {
    /// Creates a resolver with no load paths and no registered extensions.
    pub fn new() -> Self {
        Self {
            load_paths: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Inserts a load path at the front of the list.
    ///
    /// The path is normalized first. If an equal path is already present it
    /// is moved to the front rather than duplicated.
    pub fn prepend_path(&mut self, path: &str) {
        self.add_path(path, true);
    }

    /// Inserts a load path at the back of the list, relocating an existing
    /// equal entry instead of duplicating it.
    pub fn append_path(&mut self, path: &str) {
        self.add_path(path, false);
    }

    fn add_path(&mut self, path: &str, front: bool) {
        let normalized = Self::normalize(path);
        self.load_paths.retain(|p| *p != normalized);
        if front {
            self.load_paths.insert(0, normalized);
        } else {
            self.load_paths.push(normalized);
        }
    }

    /// Registers an extension (no dot) at the front of the extension list.
    ///
    /// The most recently added extension is tried first during probing; a
    /// re-added extension moves to the front.
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.retain(|e| e != ext);
        self.extensions.insert(0, ext.to_string());
    }

    /// Returns the registered extensions, most recently added first.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns the load paths in precedence order.
    pub fn load_paths(&self) -> &[String] {
        &self.load_paths
    }

    /// Resolves a reference to an existing on-disk path.
    ///
    /// An explicit reference is returned unchanged when it exists. Otherwise
    /// each load path is tried in order: an explicit load path is joined
    /// directly with the reference, and every load path is also joined under
    /// the current working directory. The first candidate that exists wins.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        if Self::is_explicit(reference) && Path::new(reference).exists() {
            return Ok(reference.to_string());
        }

        let cwd = std::env::current_dir()?;
        let cwd = cwd.to_string_lossy();

        for load_path in &self.load_paths {
            if Self::is_explicit(load_path) {
                let candidate = Self::join(&[load_path.as_str(), reference]);
                if Path::new(&candidate).exists() {
                    return Ok(candidate);
                }
            }

            let candidate = Self::join(&[cwd.as_ref(), load_path.as_str(), reference]);
            if Path::new(&candidate).exists() {
                return Ok(candidate);
            }
        }

        trace!(reference, "no load path yielded an existing file");
        Err(DepchainError::NotFound {
            path: reference.to_string(),
        })
    }

    /// Resolves a reference that may be missing its extension.
    ///
    /// Probes `reference.ext` for each registered extension in order and
    /// returns the first hit; falls back to resolving the bare reference,
    /// propagating that failure if it also misses.
    pub fn resolve_with_extensions(&self, reference: &str) -> Result<String> {
        for ext in &self.extensions {
            if let Ok(path) = self.resolve(&format!("{reference}.{ext}")) {
                return Ok(path);
            }
        }

        self.resolve(reference)
    }

    /// Removes a registered extension (and its dot) from `path`.
    ///
    /// Paths ending in an unregistered extension are returned unchanged.
    pub fn strip_known_extension(&self, path: &str) -> String {
        let ext = Self::extension(path);
        if ext.is_empty() || !self.extensions.iter().any(|e| e == ext) {
            return path.to_string();
        }

        path[..path.len() - ext.len() - 1].to_string()
    }

    /// Returns `true` if a reference already names a rooted location: it
    /// starts with `/` or carries a drive/scheme separator (`:`).
    pub fn is_explicit(reference: &str) -> bool {
        reference.starts_with(SEP) || reference.contains(':')
    }

    /// Returns `true` iff both paths canonicalize to the same file.
    ///
    /// A path that cannot be canonicalized (missing, unreadable) never
    /// equals anything, including another missing path.
    pub fn same_file(a: &str, b: &str) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }

    /// Returns the extension of the final path segment: the substring after
    /// its last dot, or empty if the segment has none.
    pub fn extension(path: &str) -> &str {
        let name = path.rsplit(SEP).next().unwrap_or(path);
        match name.rfind('.') {
            Some(idx) => &name[idx + 1..],
            None => "",
        }
    }

    /// Joins path segments with the canonical separator.
    pub fn join(segments: &[&str]) -> String {
        segments.join(&SEP.to_string())
    }

    /// Strips superfluous segments (`.`, `..`, empty) from a path.
    ///
    /// A `..` removes the preceding real segment; a `..` that would pop
    /// another `..` (or pop past the start) is kept literally. Explicit
    /// paths keep their leading root marker.
    pub fn normalize(path: &str) -> String {
        let mut segments: Vec<&str> = Vec::new();

        for segment in path.split(SEP) {
            let segment = segment.trim();
            if segment.is_empty() || segment == "." {
                continue;
            }

            if segment == ".." {
                match segments.last() {
                    Some(&last) if last != ".." => {
                        segments.pop();
                        continue;
                    }
                    _ => {}
                }
            }

            segments.push(segment);
        }

        let joined = segments.join(&SEP.to_string());
        if path.starts_with(SEP) {
            format!("{SEP}{joined}")
        } else {
            joined
        }
    }

    /// Lists the entry names of a directory.
    ///
    /// Entries are sorted lexically so the result is deterministic across
    /// platforms. Hidden entries (names starting with `.`) are skipped when
    /// `skip_hidden` is set.
    pub fn list_entries(dir: &str, skip_hidden: bool) -> Result<Vec<String>> {
        let mut entries: Vec<String> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if skip_hidden && name.starts_with('.') {
                continue;
            }
            entries.push(name);
        }

        entries.sort();
        Ok(entries)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}
