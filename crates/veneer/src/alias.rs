//! Symbolic path aliases.
//!
//! Theme base paths are usually written in symbolic form (`@app/themes/blank`)
//! so that registered themes stay portable across installations. The
//! [`AliasResolver`] trait is the seam the rest of the crate resolves those
//! symbols through; [`AliasMap`] is the shipped in-memory implementation.
//!
//! Alias targets may themselves be symbolic (`@blankTheme` can point at
//! `@app/themes/blank`), so resolution follows targets recursively up to a
//! fixed depth.
//!
//! # Example
//!
//! ```rust
//! use std::path::PathBuf;
//! use veneer::{AliasMap, AliasResolver};
//!
//! let mut aliases = AliasMap::with_app_root("/srv/app");
//! aliases.set_alias("@blankTheme", "@app/themes/blank");
//!
//! assert_eq!(
//!     aliases.resolve_alias("@blankTheme/views"),
//!     Some(PathBuf::from("/srv/app/themes/blank/views")),
//! );
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Maximum number of symbolic indirections followed during resolution.
///
/// Prevents a self-referential alias from looping forever; chains deeper
/// than this resolve to `None`.
const MAX_ALIAS_DEPTH: usize = 8;

/// Resolves symbolic paths and publishes new aliases.
///
/// Implementations back the two side channels the theme manager relies on:
/// resolving `@`-prefixed base paths to directories on disk, and publishing
/// `@<name>Theme` / `@activeTheme` aliases for downstream consumers.
pub trait AliasResolver {
    /// Resolves a possibly-symbolic path to an absolute filesystem path.
    ///
    /// Non-symbolic input (no `@` prefix) passes through unchanged. Returns
    /// `None` when no registered alias covers the input.
    fn resolve_alias(&self, path: &str) -> Option<PathBuf>;

    /// Registers or replaces an alias.
    ///
    /// `target` may be an absolute path or another symbolic path.
    fn set_alias(&mut self, name: &str, target: &str);
}

/// In-memory alias table.
///
/// Aliases match on whole `/`-separated segments and the longest registered
/// prefix wins, so `@app/themes/blank` can be pinned somewhere else entirely
/// without disturbing `@app`.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    entries: BTreeMap<String, String>,
}

impl AliasMap {
    /// Creates an empty alias table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with `@app` pointing at the application root.
    pub fn with_app_root(path: impl AsRef<Path>) -> Self {
        let mut map = Self::new();
        map.set_alias("@app", &path.as_ref().to_string_lossy());
        map
    }

    /// Returns the raw (unresolved) target of an alias, if registered.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    fn resolve_at_depth(&self, path: &str, depth: usize) -> Option<PathBuf> {
        if depth == 0 {
            return None;
        }
        if !path.starts_with('@') {
            return Some(PathBuf::from(path));
        }

        // Longest registered prefix on a '/' boundary wins.
        let mut best: Option<(&str, &str)> = None;
        for (alias, target) in &self.entries {
            let Some(rest) = path.strip_prefix(alias.as_str()) else {
                continue;
            };
            if !rest.is_empty() && !rest.starts_with('/') {
                continue;
            }
            if best.map_or(true, |(prev, _)| alias.len() > prev.len()) {
                best = Some((alias, target));
            }
        }

        let (alias, target) = best?;
        let resolved = self.resolve_at_depth(target, depth - 1)?;
        let rest = &path[alias.len()..];
        if rest.is_empty() {
            Some(resolved)
        } else {
            Some(resolved.join(&rest[1..]))
        }
    }
}

impl AliasResolver for AliasMap {
    fn resolve_alias(&self, path: &str) -> Option<PathBuf> {
        self.resolve_at_depth(path, MAX_ALIAS_DEPTH)
    }

    fn set_alias(&mut self, name: &str, target: &str) {
        self.entries.insert(name.to_string(), target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_passes_through() {
        let aliases = AliasMap::new();
        assert_eq!(
            aliases.resolve_alias("/srv/app/views"),
            Some(PathBuf::from("/srv/app/views"))
        );
    }

    #[test]
    fn test_unregistered_alias_is_none() {
        let aliases = AliasMap::new();
        assert_eq!(aliases.resolve_alias("@app/views"), None);
    }

    #[test]
    fn test_app_root_resolution() {
        let aliases = AliasMap::with_app_root("/srv/app");
        assert_eq!(
            aliases.resolve_alias("@app"),
            Some(PathBuf::from("/srv/app"))
        );
        assert_eq!(
            aliases.resolve_alias("@app/themes/blank"),
            Some(PathBuf::from("/srv/app/themes/blank"))
        );
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut aliases = AliasMap::with_app_root("/srv/app");
        aliases.set_alias("@app/themes", "/var/themes");
        assert_eq!(
            aliases.resolve_alias("@app/themes/blank"),
            Some(PathBuf::from("/var/themes/blank"))
        );
        assert_eq!(
            aliases.resolve_alias("@app/views"),
            Some(PathBuf::from("/srv/app/views"))
        );
    }

    #[test]
    fn test_prefix_matches_whole_segments_only() {
        let mut aliases = AliasMap::new();
        aliases.set_alias("@app", "/srv/app");
        // "@application" must not match the "@app" alias.
        assert_eq!(aliases.resolve_alias("@application/views"), None);
    }

    #[test]
    fn test_symbolic_target_resolves_recursively() {
        let mut aliases = AliasMap::with_app_root("/srv/app");
        aliases.set_alias("@blankTheme", "@app/themes/blank");
        assert_eq!(
            aliases.resolve_alias("@blankTheme/views"),
            Some(PathBuf::from("/srv/app/themes/blank/views"))
        );
    }

    #[test]
    fn test_self_referential_alias_gives_up() {
        let mut aliases = AliasMap::new();
        aliases.set_alias("@loop", "@loop");
        assert_eq!(aliases.resolve_alias("@loop/views"), None);
    }

    #[test]
    fn test_set_alias_replaces() {
        let mut aliases = AliasMap::with_app_root("/srv/app");
        aliases.set_alias("@app", "/opt/app");
        assert_eq!(
            aliases.resolve_alias("@app"),
            Some(PathBuf::from("/opt/app"))
        );
    }
}
