//! `import_or_inject` - import a module, or stand in for it.
//!
//! For test modules that need a possibly-missing module at fixture level
//! rather than around each test:
//!
//! ```ignore
//! let some_module = import_or_inject(&registry, "some_module")?;
//! // real module if importable, placeholder otherwise;
//! // the placeholder goes away when `some_module` is dropped.
//! ```

use crate::config::SurrogateConfig;
use crate::error::{SurrogateError, SurrogateResult};
use crate::guard::SurrogateGuard;
use crate::scope::Surrogate;
use std::ops::Deref;
use std::sync::Arc;
use surrogate_core::{ImportError, ImportResolver, ModuleObject, ModuleRegistry};
use tracing::debug;

/// A module returned by [`import_or_inject`].
///
/// When the module had to be injected, this value owns the stubs; they are
/// removed when it is dropped.
#[derive(Debug)]
pub struct Injected<R: ModuleRegistry> {
    module: Arc<ModuleObject>,
    guard: Option<SurrogateGuard<R>>,
}

impl<R: ModuleRegistry> Injected<R> {
    #[inline]
    pub fn module(&self) -> &Arc<ModuleObject> {
        &self.module
    }

    /// Whether the module is a placeholder rather than a real import.
    #[inline]
    pub fn is_injected(&self) -> bool {
        self.guard.is_some()
    }
}

impl<R: ModuleRegistry> Deref for Injected<R> {
    type Target = ModuleObject;

    fn deref(&self) -> &ModuleObject {
        &self.module
    }
}

/// Import `path` from `registry`, injecting placeholders if it is missing.
///
/// Only a missing module triggers injection; an invalid path is reported as
/// [`SurrogateError::InvalidPath`]. Uses [`SurrogateConfig::global`].
pub fn import_or_inject<R: ModuleRegistry>(registry: R, path: &str) -> SurrogateResult<Injected<R>> {
    import_or_inject_with(registry, path, SurrogateConfig::global().clone())
}

/// [`import_or_inject`] with explicit configuration for the injected stubs.
pub fn import_or_inject_with<R: ModuleRegistry>(
    registry: R,
    path: &str,
    config: SurrogateConfig,
) -> SurrogateResult<Injected<R>> {
    match ImportResolver::new(&registry).import_module(path) {
        Ok(module) => {
            return Ok(Injected {
                module,
                guard: None,
            });
        }
        Err(ImportError::ModuleNotFound { .. }) => {}
        Err(ImportError::InvalidName { .. }) => return Err(SurrogateError::invalid_path(path)),
        Err(err) => return Err(err.into()),
    }

    let guard = Surrogate::new(path).with_config(config).enter(registry)?;
    let module = ImportResolver::new(guard.registry()).import_module(path)?;
    debug!(module = path, "injected placeholder for missing module");

    Ok(Injected {
        module,
        guard: Some(guard),
    })
}
