//! Module registry - the `sys.modules` mapping.
//!
//! Import resolution and the surrogate registrar only talk to the registry
//! through the narrow [`ModuleRegistry`] trait: existence check, get,
//! insert and remove. [`SysModules`] is the in-memory implementation; a
//! process-wide instance is available through [`sys_modules`].

use crate::module_object::ModuleObject;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

// =============================================================================
// ModuleRegistry
// =============================================================================

/// Mapping from fully-qualified dotted names to module objects.
///
/// Standard mapping semantics: `insert` is last-write-wins and returns the
/// replaced entry, `remove` of an absent key returns `None`.
pub trait ModuleRegistry {
    /// Whether `name` has an entry.
    fn contains(&self, name: &str) -> bool;

    /// Get the module registered under `name`.
    fn get(&self, name: &str) -> Option<Arc<ModuleObject>>;

    /// Register `module` under `name`, returning any replaced entry.
    fn insert(&self, name: Arc<str>, module: Arc<ModuleObject>) -> Option<Arc<ModuleObject>>;

    /// Remove the entry for `name`.
    fn remove(&self, name: &str) -> Option<Arc<ModuleObject>>;
}

impl<R: ModuleRegistry + ?Sized> ModuleRegistry for &R {
    #[inline]
    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    #[inline]
    fn get(&self, name: &str) -> Option<Arc<ModuleObject>> {
        (**self).get(name)
    }

    #[inline]
    fn insert(&self, name: Arc<str>, module: Arc<ModuleObject>) -> Option<Arc<ModuleObject>> {
        (**self).insert(name, module)
    }

    #[inline]
    fn remove(&self, name: &str) -> Option<Arc<ModuleObject>> {
        (**self).remove(name)
    }
}

impl<R: ModuleRegistry + ?Sized> ModuleRegistry for Arc<R> {
    #[inline]
    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    #[inline]
    fn get(&self, name: &str) -> Option<Arc<ModuleObject>> {
        (**self).get(name)
    }

    #[inline]
    fn insert(&self, name: Arc<str>, module: Arc<ModuleObject>) -> Option<Arc<ModuleObject>> {
        (**self).insert(name, module)
    }

    #[inline]
    fn remove(&self, name: &str) -> Option<Arc<ModuleObject>> {
        (**self).remove(name)
    }
}

// =============================================================================
// SysModules
// =============================================================================

/// In-memory module registry.
///
/// Every operation takes the lock for its own duration only; sequences of
/// operations are not atomic. Callers that mutate overlapping names from
/// several threads must synchronize externally.
#[derive(Debug, Default)]
pub struct SysModules {
    modules: RwLock<FxHashMap<Arc<str>, Arc<ModuleObject>>>,
}

impl SysModules {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with fresh empty modules.
    pub fn with_modules<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let registry = Self::new();
        for name in names {
            let name = name.into();
            let module = ModuleObject::shared(Arc::clone(&name));
            registry.insert(name, module);
        }
        registry
    }

    /// Get the number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all registered modules, sorted.
    pub fn cached_modules(&self) -> Vec<Arc<str>> {
        let mut names: Vec<_> = self.modules.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Copy of the current name → module mapping.
    ///
    /// Useful for asserting that a registry was restored exactly, including
    /// module identity.
    pub fn snapshot(&self) -> FxHashMap<Arc<str>, Arc<ModuleObject>> {
        self.modules.read().clone()
    }

    /// Whether the registry matches `snapshot` key for key and by identity.
    pub fn matches_snapshot(&self, snapshot: &FxHashMap<Arc<str>, Arc<ModuleObject>>) -> bool {
        let modules = self.modules.read();
        modules.len() == snapshot.len()
            && modules.iter().all(|(name, module)| {
                snapshot
                    .get(name)
                    .is_some_and(|other| Arc::ptr_eq(module, other))
            })
    }
}

impl ModuleRegistry for SysModules {
    #[inline]
    fn contains(&self, name: &str) -> bool {
        self.modules.read().contains_key(name)
    }

    #[inline]
    fn get(&self, name: &str) -> Option<Arc<ModuleObject>> {
        self.modules.read().get(name).cloned()
    }

    #[inline]
    fn insert(&self, name: Arc<str>, module: Arc<ModuleObject>) -> Option<Arc<ModuleObject>> {
        self.modules.write().insert(name, module)
    }

    #[inline]
    fn remove(&self, name: &str) -> Option<Arc<ModuleObject>> {
        self.modules.write().remove(name)
    }
}

// =============================================================================
// Global Registry Access
// =============================================================================

/// Process-wide module registry instance.
static SYS_MODULES: OnceLock<SysModules> = OnceLock::new();

/// Get the process-wide module registry.
#[inline]
pub fn sys_modules() -> &'static SysModules {
    SYS_MODULES.get_or_init(SysModules::new)
}

// =============================================================================
// Tests
// =============================================================================
