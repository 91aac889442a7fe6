//! Error types for theme resolution.
//!
//! All fallible operations in this crate return [`ThemeError`]. Every
//! variant propagates to the caller, with one deliberate exception:
//! [`ThemeManager::setup`](crate::ThemeManager::setup) absorbs
//! [`ThemeError::UnknownTheme`] when the configured active theme cannot
//! be resolved, logging it instead of failing the setup call.

use thiserror::Error;

/// Error type for theme loading, registration, and activation.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The theme directory does not exist or cannot be read.
    #[error("theme directory does not exist or is not readable: {path}")]
    DirectoryUnavailable {
        /// The resolved directory path that was probed.
        path: String,
    },

    /// A `theme.json` manifest exists but cannot be read or parsed.
    #[error("malformed theme manifest {path}: {message}")]
    ConfigParse {
        /// Path of the offending manifest file.
        path: String,
        /// Parser or I/O detail.
        message: String,
    },

    /// A base path was registered twice.
    #[error("theme already registered: {0}")]
    DuplicateTheme(String),

    /// No theme is registered under the requested base path.
    #[error("theme {0} could not be loaded")]
    UnknownTheme(String),

    /// A theme declares a parent that is not registered.
    #[error("theme {theme} declares unknown parent {parent}")]
    UnknownParent {
        /// Base path of the theme holding the dangling reference.
        theme: String,
        /// The parent base path that failed to resolve.
        parent: String,
    },

    /// The parent chain loops back on itself.
    #[error("cyclic theme inheritance at {0}")]
    CyclicInheritance(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThemeError::UnknownTheme("@app/themes/missing".into());
        assert_eq!(
            err.to_string(),
            "theme @app/themes/missing could not be loaded"
        );

        let err = ThemeError::UnknownParent {
            theme: "@app/themes/child".into(),
            parent: "@app/themes/gone".into(),
        };
        assert!(err.to_string().contains("@app/themes/child"));
        assert!(err.to_string().contains("@app/themes/gone"));

        let err = ThemeError::CyclicInheritance("@app/themes/a".into());
        assert!(err.to_string().contains("cyclic"));
    }
}
