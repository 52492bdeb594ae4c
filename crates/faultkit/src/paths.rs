//! Candidate path resolution and source loading
//!
//! Faults name their sources loosely: sometimes a full device path,
//! sometimes just the file name the runtime compiled. The resolver turns
//! a logical identifier into the candidate paths worth trying and loads
//! the first one that opens.

use std::path::Path;
use std::sync::Arc;

use crate::config::LaunchConfig;
use crate::fs::FileSystem;

/// Script source that was found and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLines {
    /// The lines of the file, without trailing newlines.
    pub lines: Vec<String>,
    /// The candidate path that actually opened.
    pub path: String,
}

/// Outcome of a source lookup. All candidates failing is not an error;
/// the caller gets the original identifier back as a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLookup {
    Found(SourceLines),
    Missing(Option<String>),
}

impl SourceLookup {
    /// The loaded source, if any candidate opened.
    pub fn found(self) -> Option<SourceLines> {
        match self {
            SourceLookup::Found(source) => Some(source),
            SourceLookup::Missing(_) => None,
        }
    }
}

/// Resolves logical script identifiers against the device layout.
pub struct PathResolver {
    fs: Arc<dyn FileSystem>,
    script: String,
    script_dir: String,
}

impl PathResolver {
    /// Create a resolver over the given filesystem and configuration.
    pub fn new(fs: Arc<dyn FileSystem>, config: &LaunchConfig) -> Self {
        Self {
            fs,
            script: config.script.clone(),
            script_dir: config.script_dir.clone(),
        }
    }

    /// Candidate on-device paths for an identifier, deduplicated,
    /// first-seen order preserved. The raw identifier always comes first;
    /// identifiers that are not root-anchored also get tried under the
    /// script directory and at the filesystem root.
    pub fn candidate_paths(&self, identifier: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        if !identifier.is_empty() {
            candidates.push(identifier.to_string());
            if !identifier.starts_with('/') {
                let stripped = identifier.trim_start_matches('/');
                candidates.push(format!("{}/{}", self.script_dir, stripped));
                candidates.push(format!("/{}", stripped));
            }
        }

        let mut unique = Vec::new();
        for path in candidates {
            if !path.is_empty() && !unique.contains(&path) {
                unique.push(path);
            }
        }
        unique
    }

    /// Load an identifier's source as lines, trying each candidate in
    /// order. Never errors: a lookup that finds nothing reports the
    /// original identifier as the best-effort display name.
    pub fn load(&self, identifier: Option<&str>) -> SourceLookup {
        let Some(identifier) = identifier else {
            return SourceLookup::Missing(None);
        };

        for path in self.candidate_paths(identifier) {
            if let Ok(bytes) = self.fs.read_file(Path::new(&path)) {
                let text = String::from_utf8_lossy(&bytes);
                return SourceLookup::Found(SourceLines {
                    lines: text.lines().map(String::from).collect(),
                    path,
                });
            }
        }

        if identifier.is_empty() {
            SourceLookup::Missing(None)
        } else {
            SourceLookup::Missing(Some(identifier.to_string()))
        }
    }

    /// Expected path of the configured script. Dots in a bare module-style
    /// name become path separators, and the script extension is appended
    /// unless already present.
    pub fn script_default_path(&self) -> String {
        let mut module_path = self.script.clone();
        if !module_path.contains('/') && module_path.contains('.') {
            module_path = module_path.replace('.', "/");
        }
        let suffix = if module_path.ends_with(".py") { "" } else { ".py" };
        let separator = if module_path.starts_with('/') { "" } else { "/" };
        format!("{}{}{}{}", self.script_dir, separator, module_path, suffix)
    }
}
