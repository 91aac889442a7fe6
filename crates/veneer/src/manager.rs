//! Theme discovery, registration, and activation.
//!
//! The [`ThemeManager`] owns the registry of discovered [`ThemeConfig`]s and
//! at most one active [`Theme`]. Discovery lists the subdirectories of the
//! application theme root (`@app/themes`) and asks the host's
//! [`PackageDiscovery`] for any contributed theme directories; each candidate
//! is loaded once and cached for the lifetime of the manager.
//!
//! Activation resolves the configured theme name (or the built-in blank
//! fallback), gives registered hooks a chance to rewrite it, builds the
//! theme's inheritance chain, and publishes the result as the active theme
//! plus an `@activeTheme` alias.

use std::collections::BTreeMap;
use std::fs;

use tracing::error;

use crate::alias::{AliasMap, AliasResolver};
use crate::config::{dir_name, ThemeConfig};
use crate::error::ThemeError;
use crate::hooks::SetupHooks;
use crate::theme::Theme;

/// Fallback theme activated when no explicit theme name is configured.
pub const APP_THEMES_BLANK: &str = "@app/themes/blank";

/// Root searched for application theme directories.
pub const APP_THEMES_ROOT: &str = "@app/themes";

/// Log target for the swallowed setup failure.
const LOG_TARGET: &str = "veneer::manager";

/// Host seam contributing extra theme directories (installed packages,
/// plugins, and the like).
pub trait PackageDiscovery {
    /// Base paths of theme directories contributed by the host.
    fn contributed_theme_dirs(&self) -> Vec<String>;
}

/// Discovery that contributes nothing. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPackages;

impl PackageDiscovery for NoPackages {
    fn contributed_theme_dirs(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Discovery backed by a fixed list of base paths.
#[derive(Debug, Clone, Default)]
pub struct StaticPackages(pub Vec<String>);

impl PackageDiscovery for StaticPackages {
    fn contributed_theme_dirs(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Registry of available themes and owner of the active one.
///
/// The manager is request-scoped: the theme table is populated lazily
/// exactly once, and the active theme is write-once until the manager is
/// dropped. Callers sharing a manager across threads must serialize access
/// themselves; hooks are `Rc`-backed, so the manager is not `Send`.
///
/// # Example
///
/// ```rust,no_run
/// use veneer::{AliasMap, ThemeError, ThemeManager};
///
/// # fn main() -> Result<(), ThemeError> {
/// let mut manager = ThemeManager::new(AliasMap::with_app_root("/srv/app"));
/// manager.setup()?;
///
/// if let Some(theme) = manager.active_theme() {
///     println!("active: {} -> {:#?}", theme.name(), theme.path_map());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ThemeManager<R = AliasMap, P = NoPackages>
where
    R: AliasResolver,
    P: PackageDiscovery,
{
    aliases: R,
    packages: P,
    active_theme_name: Option<String>,
    hooks: SetupHooks,
    themes: BTreeMap<String, ThemeConfig>,
    loaded: bool,
    active: Option<Theme>,
}

impl ThemeManager<AliasMap, NoPackages> {
    /// Creates a manager over an alias table, with no package discovery.
    pub fn new(aliases: AliasMap) -> Self {
        Self::with_packages(aliases, NoPackages)
    }
}

impl<R, P> ThemeManager<R, P>
where
    R: AliasResolver,
    P: PackageDiscovery,
{
    /// Creates a manager over explicit collaborators.
    pub fn with_packages(aliases: R, packages: P) -> Self {
        Self {
            aliases,
            packages,
            active_theme_name: None,
            hooks: SetupHooks::new(),
            themes: BTreeMap::new(),
            loaded: false,
            active: None,
        }
    }

    /// Names the theme [`setup`](Self::setup) should activate.
    ///
    /// Accepts any base-path form (`@app/themes/dark`, absolute, relative).
    /// Without an explicit name, setup falls back to [`APP_THEMES_BLANK`].
    pub fn set_active_theme_name(&mut self, base_path: impl Into<String>) {
        self.active_theme_name = Some(base_path.into());
    }

    /// Registers a before-setup hook.
    ///
    /// Hooks run in registration order and may rewrite the candidate base
    /// path before it is resolved; see [`SetupHooks`].
    pub fn on_setup<F>(&mut self, f: F)
    where
        F: Fn(&mut String) + 'static,
    {
        self.hooks.push(f);
    }

    /// The alias resolver, for inspecting published aliases.
    pub fn aliases(&self) -> &R {
        &self.aliases
    }

    /// Mutable access to the alias resolver, for seeding roots like `@app`.
    pub fn aliases_mut(&mut self) -> &mut R {
        &mut self.aliases
    }

    /// All registered theme configs, keyed by base path.
    ///
    /// The first call discovers and loads every candidate directory; the
    /// resulting table is cached for the lifetime of the manager. Each
    /// registration publishes a `@<dirname>Theme` alias as a side effect.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::DirectoryUnavailable`] / [`ThemeError::ConfigParse`]
    ///   from loading a candidate directory.
    /// - [`ThemeError::DuplicateTheme`] when two candidates share a base
    ///   path.
    pub fn themes(&mut self) -> Result<&BTreeMap<String, ThemeConfig>, ThemeError> {
        if !self.loaded {
            // Rebuild from scratch so a failed partial population can be
            // retried without tripping the duplicate check.
            self.themes.clear();
            for definition in self.theme_definitions() {
                let config = ThemeConfig::load(&definition, &self.aliases)?;
                self.register_theme(config)?;
            }
            self.loaded = true;
        }
        Ok(&self.themes)
    }

    /// Looks up a registered theme config.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnknownTheme`] when nothing is registered under
    /// `base_path`, plus any error from first-time table population.
    pub fn theme_by_base_path(&mut self, base_path: &str) -> Result<ThemeConfig, ThemeError> {
        self.themes()?
            .get(base_path)
            .cloned()
            .ok_or_else(|| ThemeError::UnknownTheme(base_path.to_string()))
    }

    /// Resolves and activates the configured theme.
    ///
    /// Idempotent: once a theme is active, further calls return immediately.
    /// Otherwise the candidate base path (explicit name or
    /// [`APP_THEMES_BLANK`]) is passed through the before-setup hooks,
    /// resolved, built, and published: the theme is stored and the
    /// `@activeTheme` alias is set.
    ///
    /// # Errors
    ///
    /// An unresolvable candidate ([`ThemeError::UnknownTheme`]) is logged
    /// and swallowed: the call returns `Ok(())` and the manager stays
    /// inactive, so a later call may retry. Every other failure propagates.
    pub fn setup(&mut self) -> Result<(), ThemeError> {
        if self.active.is_some() {
            return Ok(());
        }

        let mut base_path = self.active_theme_base_path();
        self.hooks.run(&mut base_path);

        let config = match self.theme_by_base_path(&base_path) {
            Ok(config) => config,
            Err(err @ ThemeError::UnknownTheme(_)) => {
                error!(target: LOG_TARGET, "setup skipped: {err}");
                return Ok(());
            }
            Err(other) => return Err(other),
        };

        let theme = {
            let themes = &self.themes;
            Theme::build(config, |base_path| {
                themes
                    .get(base_path)
                    .cloned()
                    .ok_or_else(|| ThemeError::UnknownTheme(base_path.to_string()))
            })?
        };

        self.activate(theme);
        Ok(())
    }

    /// The currently active theme, or `None` until [`setup`](Self::setup)
    /// succeeds.
    pub fn active_theme(&self) -> Option<&Theme> {
        self.active.as_ref()
    }

    /// Candidate base path before hooks run.
    fn active_theme_base_path(&self) -> String {
        match &self.active_theme_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => APP_THEMES_BLANK.to_string(),
        }
    }

    /// Candidate directories: `@app/themes` subdirectories (sorted, so
    /// registration order is deterministic) followed by host contributions
    /// in the order the host reports them.
    fn theme_definitions(&self) -> Vec<String> {
        let mut definitions = Vec::new();

        if let Some(root) = self.aliases.resolve_alias(APP_THEMES_ROOT) {
            if let Ok(entries) = fs::read_dir(&root) {
                for entry in entries.flatten() {
                    if !entry.path().is_dir() {
                        continue;
                    }
                    if let Some(dirname) = entry.file_name().to_str() {
                        definitions.push(format!("{APP_THEMES_ROOT}/{dirname}"));
                    }
                }
            }
        }
        definitions.sort();

        definitions.extend(self.packages.contributed_theme_dirs());
        definitions
    }

    /// Registers one config and publishes its `@<dirname>Theme` alias.
    fn register_theme(&mut self, config: ThemeConfig) -> Result<(), ThemeError> {
        let base_path = config.base_path().to_string();
        if self.themes.contains_key(&base_path) {
            return Err(ThemeError::DuplicateTheme(base_path));
        }

        let alias = format!("@{}Theme", dir_name(&base_path));
        self.aliases.set_alias(&alias, &base_path);
        self.themes.insert(base_path, config);
        Ok(())
    }

    /// Publishes `theme` as the active theme and sets the `@activeTheme`
    /// alias for downstream consumers.
    fn activate(&mut self, theme: Theme) {
        self.aliases.set_alias("@activeTheme", theme.base_path());
        self.active = Some(theme);
    }
}
