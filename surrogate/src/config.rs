//! Stub configuration resolved from the environment.
//!
//! Like the interpreter's runtime configuration, a `SurrogateConfig` is an
//! immutable value resolved once; registrations read it without further
//! environment access.

use std::sync::OnceLock;

/// Set to disable `__all__` maintenance.
pub const ENV_NO_EXPORT_NAMES: &str = "SURROGATE_NO_EXPORT_NAMES";
/// Set to stop marking non-leaf stubs as packages.
pub const ENV_NO_PACKAGE_MARK: &str = "SURROGATE_NO_PACKAGE_MARK";
/// Set to leave pre-existing parent modules without a link to their stub.
pub const ENV_NO_PARENT_LINK: &str = "SURROGATE_NO_PARENT_LINK";
/// Logging verbosity for [`crate::logging::init_test_logging`].
pub const ENV_VERBOSE: &str = "SURROGATE_VERBOSE";

// =============================================================================
// SurrogateConfig
// =============================================================================

/// How placeholder modules are shaped and linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurrogateConfig {
    /// Maintain `__all__` on stubs, and extend it on a linked pre-existing
    /// parent for the duration of the scope.
    pub export_names: bool,

    /// Give every non-leaf stub an empty `__path__`.
    pub mark_packages: bool,

    /// Bind the first stub as an attribute of the deepest pre-existing
    /// module, restoring that module's attributes on teardown.
    pub link_existing_parent: bool,

    /// Logging level: 0 = warnings only, 1 = debug, 2+ = trace.
    pub verbose: u32,
}

impl Default for SurrogateConfig {
    fn default() -> Self {
        Self {
            export_names: true,
            mark_packages: true,
            link_existing_parent: true,
            verbose: 0,
        }
    }
}

impl SurrogateConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |var: &str| lookup(var).is_some_and(|v| is_truthy(&v));

        let verbose = match lookup(ENV_VERBOSE) {
            Some(val) => val
                .parse::<u32>()
                .unwrap_or(if val.is_empty() { 0 } else { 1 }),
            None => 0,
        };

        Self {
            export_names: !flag(ENV_NO_EXPORT_NAMES),
            mark_packages: !flag(ENV_NO_PACKAGE_MARK),
            link_existing_parent: !flag(ENV_NO_PARENT_LINK),
            verbose,
        }
    }

    /// Configuration shared by [`crate::surrogate`], resolved from the
    /// environment on first use.
    pub fn global() -> &'static SurrogateConfig {
        static GLOBAL: OnceLock<SurrogateConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::from_env)
    }

    #[must_use]
    pub fn with_export_names(mut self, enabled: bool) -> Self {
        self.export_names = enabled;
        self
    }

    #[must_use]
    pub fn with_mark_packages(mut self, enabled: bool) -> Self {
        self.mark_packages = enabled;
        self
    }

    #[must_use]
    pub fn with_link_existing_parent(mut self, enabled: bool) -> Self {
        self.link_existing_parent = enabled;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, level: u32) -> Self {
        self.verbose = level;
        self
    }
}

/// Non-empty and not "0".
#[inline]
fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

// =============================================================================
// Tests
// =============================================================================
