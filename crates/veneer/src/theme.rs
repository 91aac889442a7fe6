//! Active theme and the inheritance path map.
//!
//! A [`Theme`] is built once, at activation time, from a [`ThemeConfig`] and
//! the registry of all known configs. Building walks the parent chain
//! (most specific theme first) and derives the path map the view renderer
//! uses to find the first existing template across the chain.
//!
//! # Path map
//!
//! Views can be referenced either by their application-relative location or
//! by the theme-specific one, so the map carries both as keys, and both
//! resolve through the identical fallback list, letting a view be overridden
//! at any ancestor level:
//!
//! ```text
//! @app/views                -> [@app/views, <theme>/views, <parent>/views, ...]
//! @app/themes/<name>/views  -> [@app/views, <theme>/views, <parent>/views, ...]
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::config::ThemeConfig;
use crate::error::ThemeError;

/// View root of the hosting application; always the first fallback candidate.
pub const APP_VIEWS: &str = "@app/views";

/// A resolved theme: its config plus the computed view fallback table.
#[derive(Debug, Clone)]
pub struct Theme {
    config: ThemeConfig,
    base_path: String,
    path_map: BTreeMap<String, Vec<String>>,
}

impl Theme {
    /// Builds a theme by resolving the full inheritance chain of `config`.
    ///
    /// `lookup` resolves a base path to its registered config; the manager
    /// passes a closure over its theme table. The walk visits
    /// `[config, parent, grandparent, ...]` and stops at the first config
    /// without a parent.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::CyclicInheritance`] when a base path repeats during
    ///   the walk (a self-parent counts).
    /// - [`ThemeError::UnknownParent`] when a declared parent is not
    ///   registered.
    pub fn build<F>(config: ThemeConfig, lookup: F) -> Result<Self, ThemeError>
    where
        F: Fn(&str) -> Result<ThemeConfig, ThemeError>,
    {
        let base_path = config.base_path().to_string();
        let chain = inheritance_chain(&config, &lookup)?;

        let mut fallback = Vec::with_capacity(chain.len() + 1);
        fallback.push(APP_VIEWS.to_string());
        for entry in &chain {
            let views = view_path(entry.base_path());
            if !fallback.contains(&views) {
                fallback.push(views);
            }
        }

        let mut path_map = BTreeMap::new();
        path_map.insert(APP_VIEWS.to_string(), fallback.clone());
        path_map.insert(view_path(&base_path), fallback);

        Ok(Self {
            config,
            base_path,
            path_map,
        })
    }

    /// The config this theme was built from.
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// The theme's base path (registry key).
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The theme's display name.
    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// The theme's own view directory, `<base_path>/views`.
    pub fn view_path(&self) -> String {
        view_path(&self.base_path)
    }

    /// Source view root → ordered candidate view directories.
    pub fn path_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.path_map
    }

    /// The fallback list for one source view root, if it is mapped.
    pub fn fallback_paths(&self, source: &str) -> Option<&[String]> {
        self.path_map.get(source).map(Vec::as_slice)
    }
}

/// Candidate view directory contributed by one chain entry.
pub(crate) fn view_path(base_path: &str) -> String {
    format!("{}/views", base_path.trim_end_matches('/'))
}

/// Walks the parent chain, most specific config first.
fn inheritance_chain<F>(config: &ThemeConfig, lookup: &F) -> Result<Vec<ThemeConfig>, ThemeError>
where
    F: Fn(&str) -> Result<ThemeConfig, ThemeError>,
{
    let mut seen = BTreeSet::new();
    seen.insert(config.base_path().to_string());

    let mut chain = vec![config.clone()];
    loop {
        let current = match chain.last() {
            Some(current) => current,
            None => break,
        };
        let Some(parent) = current.parent().map(str::to_string) else {
            break;
        };

        if !seen.insert(parent.clone()) {
            return Err(ThemeError::CyclicInheritance(parent));
        }

        let theme = current.base_path().to_string();
        let parent_config = lookup(&parent).map_err(|err| match err {
            ThemeError::UnknownTheme(_) => ThemeError::UnknownParent { theme, parent },
            other => other,
        })?;
        chain.push(parent_config);
    }

    Ok(chain)
}
