//! `surrogate(path)` - placeholder modules scoped to a call.
//!
//! Three equivalent ways of scoping the same registration:
//!
//! ```ignore
//! // Guard: stubs live until `_guard` drops.
//! let _guard = surrogate("sys.my.cool.module1").enter(&registry)?;
//!
//! // One-shot: stubs live for the duration of the closure.
//! surrogate("sys.my.cool.module1").run(&registry, || import_stuff())?;
//!
//! // Wrapper: every call of `f` is scoped; wrappers stack.
//! let f = surrogate("sys.my.cool.module1")
//!     .wrap(&registry, surrogate("sys.my.cool.module2").wrap(&registry, body));
//! f(args)?;
//! ```

use crate::config::SurrogateConfig;
use crate::error::{SurrogateError, SurrogateResult};
use crate::guard::SurrogateGuard;
use crate::registrar::Registrar;
use std::sync::Arc;
use surrogate_core::ModuleRegistry;

/// Create a [`Surrogate`] for `path` using the global configuration.
///
/// The path is validated when the surrogate is entered, before any wrapped
/// code runs.
#[inline]
pub fn surrogate(path: impl Into<Arc<str>>) -> Surrogate {
    Surrogate::new(path)
}

// =============================================================================
// Surrogate
// =============================================================================

/// A dotted path to make importable for the duration of a scope.
#[derive(Debug, Clone)]
pub struct Surrogate {
    path: Arc<str>,
    config: SurrogateConfig,
}

impl Surrogate {
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            config: SurrogateConfig::global().clone(),
        }
    }

    /// Replace the configuration used for this path.
    #[must_use]
    pub fn with_config(mut self, config: SurrogateConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn config(&self) -> &SurrogateConfig {
        &self.config
    }

    /// Register the path and return a guard that removes the stubs on drop.
    pub fn enter<R: ModuleRegistry>(&self, registry: R) -> SurrogateResult<SurrogateGuard<R>> {
        let registrar = Registrar::with_config(registry, self.config.clone());
        let registration = registrar.register(&self.path)?;
        Ok(SurrogateGuard::new(registrar, registration))
    }

    /// Run `f` with the path registered.
    ///
    /// `f` is not called if the path is invalid. Its return value is passed
    /// through untouched; a panic in `f` unwinds after teardown.
    pub fn run<R, F, T>(&self, registry: R, f: F) -> SurrogateResult<T>
    where
        R: ModuleRegistry,
        F: FnOnce() -> T,
    {
        let _guard = self.enter(registry)?;
        Ok(f())
    }

    /// Wrap `f` so that every call runs with the path registered.
    ///
    /// Registration failures surface through `E`; errors returned by `f`
    /// come back as-is after teardown. Since the wrapper has the same shape
    /// as `f`, wrappers compose: the outermost registers first and tears
    /// down last.
    pub fn wrap<R, F, A, T, E>(self, registry: R, f: F) -> impl Fn(A) -> Result<T, E>
    where
        R: ModuleRegistry,
        F: Fn(A) -> Result<T, E>,
        E: From<SurrogateError>,
    {
        move |args| {
            let _guard = self.enter(&registry)?;
            f(args)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
