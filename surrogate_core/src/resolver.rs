//! Import resolution against a module registry.
//!
//! Only the cached path is modelled: a module is importable when it, and
//! every package above it, has a registry entry. There is no source loader.
//!
//! ```text
//! import_module("a.b.c")
//!   ├── registry["a"]      ─┐
//!   ├── registry["a.b"]     ├─ all must be present
//!   └── registry["a.b.c"]  ─┘  → returns registry["a.b.c"]
//!
//! import_from(a.b, "c")
//!   ├── attribute `c` on a.b
//!   └── fallback: registry["a.b.c"]
//! ```

use crate::module_object::ModuleObject;
use crate::package::DottedName;
use crate::registry::ModuleRegistry;
use crate::value::AttrValue;
use std::sync::Arc;
use tracing::trace;

// =============================================================================
// Import Errors
// =============================================================================

/// Errors raised while resolving an import.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// No registry entry for the module (or one of its parents).
    #[error("No module named '{module}'")]
    ModuleNotFound { module: Arc<str> },

    /// `from module import name` found neither an attribute nor a submodule.
    #[error("cannot import name '{name}' from '{module}'")]
    CannotImportName { name: Arc<str>, module: Arc<str> },

    /// The name resolved, but to something other than a module.
    #[error("'{module}.{name}' is a {found}, not a module")]
    NotAModule {
        name: Arc<str>,
        module: Arc<str>,
        found: &'static str,
    },

    /// The requested name is not a valid dotted module name.
    #[error("invalid module name: {name:?}")]
    InvalidName { name: Arc<str> },
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

// =============================================================================
// ImportResolver
// =============================================================================

/// Resolves `import` and `from ... import` against a registry.
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<R> {
    registry: R,
}

impl<R: ModuleRegistry> ImportResolver<R> {
    /// Create a resolver over `registry`.
    #[inline]
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Get the underlying registry.
    #[inline]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Resolve `import name`, returning the leaf module.
    ///
    /// Every prefix of `name` must be registered; the first missing one is
    /// reported, as `import a.b.c` would report `a` before `a.b`.
    pub fn import_module(&self, name: &str) -> ImportResult<Arc<ModuleObject>> {
        let dotted = DottedName::parse(name).ok_or_else(|| ImportError::InvalidName {
            name: Arc::from(name),
        })?;

        let mut module = None;
        for (_, _, prefix) in dotted.prefixes() {
            match self.registry.get(&prefix) {
                Some(found) => module = Some(found),
                None => return Err(ImportError::ModuleNotFound { module: prefix }),
            }
        }

        trace!(module = name, "import resolved from registry");
        module.ok_or_else(|| ImportError::ModuleNotFound {
            module: Arc::from(name),
        })
    }

    /// Resolve `from module import name`.
    ///
    /// Attribute access wins; otherwise the submodule registered under
    /// `"{module}.{name}"` is returned.
    pub fn import_from(&self, module: &ModuleObject, name: &str) -> ImportResult<AttrValue> {
        if let Some(value) = module.get_attr(name) {
            return Ok(value);
        }

        let qualified = format!("{}.{}", module.name(), name);
        self.registry
            .get(&qualified)
            .map(AttrValue::Module)
            .ok_or_else(|| ImportError::CannotImportName {
                name: Arc::from(name),
                module: Arc::from(module.name()),
            })
    }

    /// Resolve `from module import name` where `name` must be a submodule.
    pub fn import_submodule(
        &self,
        module: &ModuleObject,
        name: &str,
    ) -> ImportResult<Arc<ModuleObject>> {
        match self.import_from(module, name)? {
            AttrValue::Module(m) => Ok(m),
            other => Err(ImportError::NotAModule {
                name: Arc::from(name),
                module: Arc::from(module.name()),
                found: other.type_name(),
            }),
        }
    }

    /// Resolve `from module import *`, in `public_names` order.
    pub fn import_star(&self, module: &ModuleObject) -> ImportResult<Vec<(Arc<str>, AttrValue)>> {
        module
            .public_names()
            .into_iter()
            .map(|name| {
                let value = self.import_from(module, &name)?;
                Ok((name, value))
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
