//! Theme descriptors loaded from `theme.json` manifests.
//!
//! A [`ThemeConfig`] describes one theme directory: its base path (the
//! registry key, usually symbolic), its display name, and an optional parent
//! theme it inherits views from. Configs are read once per discovered
//! directory and are immutable afterwards.
//!
//! The manifest file is optional. A theme directory with no `theme.json`
//! yields a config whose name is derived from the directory name and which
//! declares no parent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::alias::AliasResolver;
use crate::error::ThemeError;

/// Manifest file name looked up inside every theme directory.
pub const THEME_MANIFEST: &str = "theme.json";

/// Recognized `theme.json` keys. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    parent: Option<String>,
}

/// Immutable descriptor of one theme directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    base_path: String,
    name: String,
    parent: Option<String>,
}

impl ThemeConfig {
    /// Creates a config programmatically, without touching the filesystem.
    ///
    /// The name defaults to the final segment of `base_path`; override it
    /// with [`with_name`](Self::with_name).
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        let name = dir_name(&base_path).to_string();
        Self {
            base_path,
            name,
            parent: None,
        }
    }

    /// Sets the display name, returning `self` for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the parent base path, returning `self` for chaining.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Loads the config for a theme directory.
    ///
    /// `base_path` may be symbolic (`@app/themes/blank`), relative to the
    /// `@app` root, or absolute. Symbolic and absolute base paths are kept
    /// verbatim as the registry key; relative ones are rewritten to the
    /// joined absolute form.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::DirectoryUnavailable`] when the base path does not
    ///   resolve to a readable directory.
    /// - [`ThemeError::ConfigParse`] when a `theme.json` is present but
    ///   cannot be read or parsed.
    pub fn load(base_path: &str, resolver: &impl AliasResolver) -> Result<Self, ThemeError> {
        let (base_path, dir) = locate(base_path, resolver)?;

        if !dir.is_dir() {
            return Err(ThemeError::DirectoryUnavailable {
                path: dir.display().to_string(),
            });
        }
        // A directory that exists but cannot be listed is as good as absent.
        fs::read_dir(&dir).map_err(|_| ThemeError::DirectoryUnavailable {
            path: dir.display().to_string(),
        })?;

        let manifest = read_manifest(&dir)?;
        let name = manifest
            .name
            .unwrap_or_else(|| dir_name(&base_path).to_string());

        Ok(Self {
            base_path,
            name,
            parent: manifest.parent,
        })
    }

    /// The registry key for this theme.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The display name of the theme.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base path of the parent theme, if one is declared.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Resolves a base path to `(registry key, directory on disk)`.
fn locate(
    base_path: &str,
    resolver: &impl AliasResolver,
) -> Result<(String, PathBuf), ThemeError> {
    if base_path.starts_with('@') {
        let dir = resolver
            .resolve_alias(base_path)
            .ok_or_else(|| ThemeError::DirectoryUnavailable {
                path: base_path.to_string(),
            })?;
        return Ok((base_path.to_string(), dir));
    }

    if Path::new(base_path).is_absolute() {
        return Ok((base_path.to_string(), PathBuf::from(base_path)));
    }

    // App-relative form: anchor under @app and keep the absolute result
    // as the registry key.
    let app_root =
        resolver
            .resolve_alias("@app")
            .ok_or_else(|| ThemeError::DirectoryUnavailable {
                path: base_path.to_string(),
            })?;
    let dir = app_root.join(base_path);
    Ok((dir.to_string_lossy().into_owned(), dir))
}

/// Reads and parses the optional manifest inside a theme directory.
fn read_manifest(dir: &Path) -> Result<Manifest, ThemeError> {
    let path = dir.join(THEME_MANIFEST);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Manifest::default()),
        Err(err) => {
            return Err(ThemeError::ConfigParse {
                path: path.display().to_string(),
                message: err.to_string(),
            })
        }
    };

    serde_json::from_str(&raw).map_err(|err| ThemeError::ConfigParse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Final `/`-separated segment of a base path.
pub(crate) fn dir_name(base_path: &str) -> &str {
    let trimmed = base_path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasMap;
    use tempfile::TempDir;

    fn theme_dir(root: &TempDir, name: &str, manifest: Option<&str>) -> PathBuf {
        let dir = root.path().join("themes").join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(manifest) = manifest {
            fs::write(dir.join(THEME_MANIFEST), manifest).unwrap();
        }
        dir
    }

    fn aliases(root: &TempDir) -> AliasMap {
        AliasMap::with_app_root(root.path())
    }

    #[test]
    fn test_load_without_manifest_defaults() {
        let root = TempDir::new().unwrap();
        theme_dir(&root, "blank", None);

        let config = ThemeConfig::load("@app/themes/blank", &aliases(&root)).unwrap();
        assert_eq!(config.base_path(), "@app/themes/blank");
        assert_eq!(config.name(), "blank");
        assert_eq!(config.parent(), None);
    }

    #[test]
    fn test_load_reads_manifest_fields() {
        let root = TempDir::new().unwrap();
        theme_dir(
            &root,
            "corporate",
            Some(r#"{"name": "Corporate", "parent": "@app/themes/blank"}"#),
        );

        let config = ThemeConfig::load("@app/themes/corporate", &aliases(&root)).unwrap();
        assert_eq!(config.name(), "Corporate");
        assert_eq!(config.parent(), Some("@app/themes/blank"));
    }

    #[test]
    fn test_load_ignores_unknown_manifest_keys() {
        let root = TempDir::new().unwrap();
        theme_dir(
            &root,
            "blank",
            Some(r#"{"name": "Blank", "author": "someone", "version": 3}"#),
        );

        let config = ThemeConfig::load("@app/themes/blank", &aliases(&root)).unwrap();
        assert_eq!(config.name(), "Blank");
    }

    #[test]
    fn test_load_malformed_manifest_is_config_parse() {
        let root = TempDir::new().unwrap();
        theme_dir(&root, "broken", Some(r#"{"name": "#));

        let err = ThemeConfig::load("@app/themes/broken", &aliases(&root)).unwrap_err();
        assert!(matches!(err, ThemeError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_missing_directory_is_unavailable() {
        let root = TempDir::new().unwrap();
        let err = ThemeConfig::load("@app/themes/ghost", &aliases(&root)).unwrap_err();
        assert!(matches!(err, ThemeError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_load_unresolvable_alias_is_unavailable() {
        let err = ThemeConfig::load("@nowhere/themes/blank", &AliasMap::new()).unwrap_err();
        assert!(matches!(err, ThemeError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_load_absolute_base_path() {
        let root = TempDir::new().unwrap();
        let dir = theme_dir(&root, "blank", None);

        let base_path = dir.to_string_lossy().into_owned();
        let config = ThemeConfig::load(&base_path, &AliasMap::new()).unwrap();
        assert_eq!(config.base_path(), base_path);
        assert_eq!(config.name(), "blank");
    }

    #[test]
    fn test_load_relative_base_path_rewrites_key() {
        let root = TempDir::new().unwrap();
        let dir = theme_dir(&root, "blank", None);

        let config = ThemeConfig::load("themes/blank", &aliases(&root)).unwrap();
        assert_eq!(config.base_path(), dir.to_string_lossy());
    }

    #[test]
    fn test_new_derives_name_from_base_path() {
        let config = ThemeConfig::new("@app/themes/blank3");
        assert_eq!(config.name(), "blank3");

        let config = ThemeConfig::new("@app/themes/blank3").with_name("Third");
        assert_eq!(config.name(), "Third");
    }

    #[test]
    fn test_dir_name() {
        assert_eq!(dir_name("@app/themes/blank"), "blank");
        assert_eq!(dir_name("/srv/app/themes/dark/"), "dark");
        assert_eq!(dir_name("blank"), "blank");
    }
}
