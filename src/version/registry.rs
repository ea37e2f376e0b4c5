//! Registry of class-paths for old releases used in backward-compatibility tests
//!
//! The build writes one `test<version>=<classpath>` entry per configured
//! release, plus a bare `test=<classpath>` entry for the build under
//! development. Test harnesses look up a version here before launching a
//! worker process on the matching class-path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config;
use crate::parser::parse_properties;
use crate::version::error::RegistryError;

/// Version identifier of the build under development
pub const CURRENT_VERSION: &str = "000";

/// Key prefix marking class-path entries in the generated file
const VERSION_KEY_PREFIX: &str = "test";

static GLOBAL: OnceCell<VersionRegistry> = OnceCell::new();

/// Immutable mapping of version identifiers to class-paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRegistry {
    classpaths: IndexMap<String, String>,
    /// Identifiers in the order they appear in the file
    versions: Vec<String>,
    oldest: String,
    source: Option<PathBuf>,
}

impl VersionRegistry {
    /// Creates a registry that knows only [`CURRENT_VERSION`]
    pub fn empty() -> Self {
        Self {
            classpaths: IndexMap::new(),
            versions: Vec::new(),
            oldest: CURRENT_VERSION.to_string(),
            source: None,
        }
    }

    /// Loads the registry from a generated class-path file.
    ///
    /// A missing file is a supported configuration and yields [`Self::empty`].
    /// Any other I/O failure means the build output is broken and is returned
    /// as [`RegistryError::Unreadable`]. Bytes that are not UTF-8 are replaced
    /// rather than rejected.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Version class-path file {:?} not found, tests will use the current version only",
                    path
                );
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(RegistryError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        info!("Loading version class-paths from {:?}", path);

        let content = String::from_utf8(bytes).unwrap_or_else(|e| {
            warn!(
                "Version class-path file {:?} is not valid UTF-8, replacing invalid bytes",
                path
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        });

        let mut registry = Self::from_properties(&content);
        registry.source = Some(path.to_path_buf());

        info!(
            "Loaded {} versions, oldest is {}",
            registry.versions.len(),
            registry.oldest
        );

        Ok(registry)
    }

    /// Builds the registry from properties text already in memory
    pub fn from_properties(content: &str) -> Self {
        let mut classpaths = IndexMap::new();
        let mut versions = Vec::new();

        for (key, classpath) in parse_properties(content) {
            let Some(suffix) = key.strip_prefix(VERSION_KEY_PREFIX) else {
                debug!("Ignoring non-version key {:?}", key);
                continue;
            };

            let version = if suffix.is_empty() {
                CURRENT_VERSION
            } else {
                suffix
            };

            if classpaths.insert(version.to_string(), classpath).is_none() {
                versions.push(version.to_string());
            }
        }

        // Plain string ordering: "1.10.0" sorts before "1.8.0".
        let oldest = versions
            .iter()
            .filter(|version| !Self::is_current_version(version))
            .min()
            .cloned()
            .unwrap_or_else(|| CURRENT_VERSION.to_string());

        Self {
            classpaths,
            versions,
            oldest,
            source: None,
        }
    }

    /// Returns the process-wide registry, loading it on first use.
    ///
    /// # Panics
    /// If the class-path file exists but cannot be read.
    pub fn global() -> &'static Self {
        Self::try_global().unwrap_or_else(|e| panic!("{}", e))
    }

    /// Returns the process-wide registry, loading it from
    /// [`config::classpaths_file`] on first use.
    ///
    /// Concurrent callers block until the first load finishes. A failed load
    /// leaves the instance unset, so the next call reads the file again.
    pub fn try_global() -> Result<&'static Self, RegistryError> {
        GLOBAL.get_or_try_init(|| Self::load(&config::classpaths_file()))
    }

    /// Returns true if the version is [`CURRENT_VERSION`] or has a class-path
    pub fn is_valid_version(&self, version: &str) -> bool {
        Self::is_current_version(version) || self.classpaths.contains_key(version)
    }

    /// Returns true if the version is [`CURRENT_VERSION`]
    pub fn is_current_version(version: &str) -> bool {
        version == CURRENT_VERSION
    }

    /// Returns the class-path for a version, or `None` if it is unknown
    pub fn classpath(&self, version: &str) -> Option<&str> {
        self.classpaths.get(version).map(|s| s.as_str())
    }

    /// Returns all known versions in file order
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn versions_without_current(&self) -> Vec<String> {
        self.versions
            .iter()
            .filter(|version| !Self::is_current_version(version))
            .cloned()
            .collect()
    }

    /// Returns the lexicographically smallest historical version, or
    /// [`CURRENT_VERSION`] when none are configured
    pub fn oldest_version(&self) -> &str {
        &self.oldest
    }

    /// Iterates `(version, classpath)` pairs in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classpaths
            .iter()
            .map(|(version, classpath)| (version.as_str(), classpath.as_str()))
    }

    /// Returns the file this registry was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
