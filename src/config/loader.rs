//! Configuration file loading

use super::file::{CompareConfig, CONFIG_FILE_NAME};
use crate::error::CompareError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .node-iter-compare.toml in the given directory
    ///
    /// A missing file yields the default config.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use node_iter_compare::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Comparing metric: {}", config.metric);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(dir: &Path) -> Result<CompareConfig> {
        Self::load_with_fs(dir, &RealFileSystem)
    }

    /// Load config from a directory with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<CompareConfig> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        // Read directly rather than checking existence first
        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {} found, using defaults", config_path.display());
                return Ok(CompareConfig::default());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to read {}", CONFIG_FILE_NAME));
            }
        };

        Self::parse(&contents, &config_path)
    }

    /// Load config from an explicit path; the file must exist
    pub fn load_path(path: &Path) -> Result<CompareConfig> {
        Self::load_path_with_fs(path, &RealFileSystem)
    }

    /// Load config from an explicit path with a custom filesystem implementation
    pub fn load_path_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<CompareConfig> {
        let contents = fs.read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CompareError::ConfigNotFound {
                    path: path.to_path_buf(),
                    source,
                }
            } else {
                CompareError::Io {
                    context: format!("reading {}", path.display()),
                    source,
                }
            }
        })?;

        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<CompareConfig> {
        let config: CompareConfig =
            toml_edit::de::from_str(contents).map_err(|e| CompareError::InvalidConfig {
                reason: format!("{}: {}", path.display(), e),
            })?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Check if config file exists in the directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILE_NAME).exists()
    }
}
