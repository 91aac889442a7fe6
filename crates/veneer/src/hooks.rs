//! Before-setup hook list.
//!
//! Hooks let host code rewrite the candidate active base path before the
//! manager resolves it. They run synchronously, in registration order, and
//! each receives mutable access to the candidate. The value left after the
//! last hook is what [`ThemeManager::setup`](crate::ThemeManager::setup)
//! resolves.
//!
//! # Example
//!
//! ```rust
//! use veneer::SetupHooks;
//!
//! let hooks = SetupHooks::new().before_setup(|base_path: &mut String| {
//!     if base_path == "@app/themes/blank" {
//!         *base_path = "@app/themes/corporate".to_string();
//!     }
//! });
//!
//! let mut candidate = "@app/themes/blank".to_string();
//! hooks.run(&mut candidate);
//! assert_eq!(candidate, "@app/themes/corporate");
//! ```

use std::fmt;
use std::rc::Rc;

/// Type alias for before-setup hook functions.
pub type SetupFn = Rc<dyn Fn(&mut String)>;

/// Ordered list of before-setup hooks.
#[derive(Clone, Default)]
pub struct SetupHooks {
    before_setup: Vec<SetupFn>,
}

impl SetupHooks {
    /// Creates an empty hook list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.before_setup.is_empty()
    }

    /// Adds a before-setup hook, returning `self` for chaining.
    pub fn before_setup<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut String) + 'static,
    {
        self.push(f);
        self
    }

    /// Adds a before-setup hook in place.
    pub(crate) fn push<F>(&mut self, f: F)
    where
        F: Fn(&mut String) + 'static,
    {
        self.before_setup.push(Rc::new(f));
    }

    /// Runs all hooks in registration order against the candidate base path.
    pub fn run(&self, base_path: &mut String) {
        for hook in &self.before_setup {
            hook(base_path);
        }
    }
}

impl fmt::Debug for SetupHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupHooks")
            .field("before_setup_count", &self.before_setup.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_empty() {
        let hooks = SetupHooks::new();
        assert!(hooks.is_empty());

        let mut candidate = "@app/themes/blank".to_string();
        hooks.run(&mut candidate);
        assert_eq!(candidate, "@app/themes/blank");
    }

    #[test]
    fn test_hook_rewrites_candidate() {
        let hooks = SetupHooks::new()
            .before_setup(|base_path: &mut String| *base_path = "@app/themes/dark".to_string());

        let mut candidate = "@app/themes/blank".to_string();
        hooks.run(&mut candidate);
        assert_eq!(candidate, "@app/themes/dark");
    }

    #[test]
    fn test_hooks_run_in_registration_order() {
        let hooks = SetupHooks::new()
            .before_setup(|base_path: &mut String| base_path.push_str("/first"))
            .before_setup(|base_path: &mut String| base_path.push_str("/second"));

        let mut candidate = "@app".to_string();
        hooks.run(&mut candidate);
        assert_eq!(candidate, "@app/first/second");
    }

    #[test]
    fn test_later_hook_sees_earlier_rewrite() {
        let hooks = SetupHooks::new()
            .before_setup(|base_path: &mut String| *base_path = "@app/themes/dark".to_string())
            .before_setup(|base_path: &mut String| {
                assert_eq!(base_path, "@app/themes/dark");
                *base_path = "@app/themes/darker".to_string();
            });

        let mut candidate = "@app/themes/blank".to_string();
        hooks.run(&mut candidate);
        assert_eq!(candidate, "@app/themes/darker");
    }
}
