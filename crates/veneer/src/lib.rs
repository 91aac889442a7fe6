//! # Veneer - View-Theme Resolution Library
//!
//! `veneer` resolves named view themes into deterministic template fallback
//! chains. A theme is a directory of view templates, optionally declaring a
//! parent theme in a `theme.json` manifest; veneer discovers those
//! directories, walks each theme's inheritance chain, and activates exactly
//! one theme whose path map tells a view renderer where to look for a
//! template, in order, across the whole chain.
//!
//! ## Core Concepts
//!
//! - [`ThemeConfig`]: immutable descriptor of one theme directory (base
//!   path, name, optional parent), loaded from an optional `theme.json`
//! - [`Theme`]: a resolved theme with its computed path map (source view
//!   root to deduplicated fallback directories, most specific first)
//! - [`ThemeManager`]: discovers and registers themes, then activates one
//! - [`AliasResolver`] / [`AliasMap`]: symbolic path resolution
//!   (`@app/themes/blank`) and alias publication
//! - [`SetupHooks`]: before-setup callbacks that may rewrite the candidate
//!   theme before it is resolved
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veneer::{AliasMap, ThemeError, ThemeManager};
//!
//! # fn main() -> Result<(), ThemeError> {
//! let mut manager = ThemeManager::new(AliasMap::with_app_root("/srv/app"));
//! manager.set_active_theme_name("@app/themes/corporate");
//! manager.setup()?;
//!
//! if let Some(theme) = manager.active_theme() {
//!     // Every source view root resolves through the same fallback chain.
//!     for (source, candidates) in theme.path_map() {
//!         println!("{source} -> {candidates:?}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Inheritance
//!
//! With `corporate` extending `blank`, the active path map is:
//!
//! ```text
//! @app/views                   -> [@app/views,
//!                                  @app/themes/corporate/views,
//!                                  @app/themes/blank/views]
//! @app/themes/corporate/views  -> (same list)
//! ```
//!
//! A renderer takes the requested view location, looks it up in the map,
//! and uses the first candidate directory that contains the template, so
//! any ancestor theme (or the application itself) can provide a view the
//! active theme does not override.

pub mod alias;
pub mod config;
pub mod error;
pub mod hooks;
pub mod manager;
pub mod theme;

pub use alias::{AliasMap, AliasResolver};
pub use config::{ThemeConfig, THEME_MANIFEST};
pub use error::ThemeError;
pub use hooks::{SetupFn, SetupHooks};
pub use manager::{
    NoPackages, PackageDiscovery, StaticPackages, ThemeManager, APP_THEMES_BLANK, APP_THEMES_ROOT,
};
pub use theme::{Theme, APP_VIEWS};
