//! Registration and teardown of placeholder modules.
//!
//! ```text
//! register("sys.fake.mod")            registry before: { sys }
//!   ├── "sys"          exists  → reused as parent, never replaced
//!   ├── "sys.fake"     missing → stub, inserted, bound as sys.fake
//!   └── "sys.fake.mod" missing → stub, inserted, bound as sys.fake.mod
//!   → Registration { created: ["sys.fake", "sys.fake.mod"], links: [sys] }
//!
//! teardown(registration)
//!   ├── remove "sys.fake.mod", then "sys.fake"
//!   └── restore sys.fake, drop "fake" from sys.__all__ if it was added
//! ```
//!
//! Only names recorded in a [`Registration`] are ever removed. Registrations
//! over the same registry may nest: an inner registration sees the outer
//! one's stubs as pre-existing modules and leaves their entries alone.

use crate::config::SurrogateConfig;
use crate::error::{SurrogateError, SurrogateResult};
use smallvec::SmallVec;
use std::sync::Arc;
use surrogate_core::{ALL_ATTR, AttrValue, DottedName, ModuleObject, ModuleRegistry, PATH_ATTR};
use tracing::{debug, trace, warn};

// =============================================================================
// Registration
// =============================================================================

/// Ownership record of one `register` call.
///
/// Holds the registry names this call inserted, in creation order, and the
/// attribute changes it made on modules it did not create.
#[derive(Debug)]
#[must_use = "placeholder modules stay registered until the registration is torn down"]
pub struct Registration {
    path: DottedName,
    created: SmallVec<[Arc<str>; 4]>,
    links: SmallVec<[ParentLink; 1]>,
}

impl Registration {
    /// The registered path.
    #[inline]
    pub fn path(&self) -> &DottedName {
        &self.path
    }

    /// Names inserted into the registry, shortest first.
    #[inline]
    pub fn created(&self) -> &[Arc<str>] {
        &self.created
    }

    /// Whether this registration inserted nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }

    /// Names of pre-existing modules that received a link to a stub.
    pub fn linked_parents(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.module.name())
    }
}

/// Changes one registration made to a module it does not own.
///
/// Only this link's own edits are undone, so links onto the same module
/// can be restored in any order.
#[derive(Debug)]
struct ParentLink {
    module: Arc<ModuleObject>,
    attr: Arc<str>,
    stub: Arc<ModuleObject>,
    previous_attr: Option<AttrValue>,
    /// `attr` was appended to `__all__` by this link.
    exported: bool,
}

impl ParentLink {
    fn restore(self) {
        // Someone rebound the attribute after us: theirs to undo.
        let still_ours = matches!(
            self.module.get_attr(&self.attr),
            Some(AttrValue::Module(ref m)) if Arc::ptr_eq(m, &self.stub)
        );
        if still_ours {
            match self.previous_attr {
                Some(value) => {
                    self.module.set_attr(&self.attr, value);
                }
                None => {
                    self.module.del_attr(&self.attr);
                }
            }
        }

        if self.exported {
            if let Some(mut names) = self.module.exported_names() {
                names.retain(|n| *n != self.attr);
                self.module.set_attr(ALL_ATTR, AttrValue::List(names));
            }
        }

        trace!(module = self.module.name(), attr = %self.attr, "restored parent module");
    }
}

// =============================================================================
// Registrar
// =============================================================================

/// Creates and removes placeholder modules in a registry.
#[derive(Debug, Clone)]
pub struct Registrar<R> {
    registry: R,
    config: SurrogateConfig,
}

impl<R: ModuleRegistry> Registrar<R> {
    /// Create a registrar using the global configuration.
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, SurrogateConfig::global().clone())
    }

    /// Create a registrar with explicit configuration.
    pub fn with_config(registry: R, config: SurrogateConfig) -> Self {
        Self { registry, config }
    }

    #[inline]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    #[inline]
    pub fn config(&self) -> &SurrogateConfig {
        &self.config
    }

    /// Make every prefix of `path` resolvable.
    ///
    /// Prefixes already in the registry are reused untouched; each missing
    /// prefix gets a fresh stub bound as an attribute of its parent. A path
    /// that is already fully registered yields an empty registration.
    ///
    /// Fails with [`SurrogateError::InvalidPath`] before touching the
    /// registry if `path` is not a dotted identifier path.
    pub fn register(&self, path: &str) -> SurrogateResult<Registration> {
        let dotted = DottedName::parse(path).ok_or_else(|| SurrogateError::invalid_path(path))?;
        let depth = dotted.depth();

        let mut created: SmallVec<[Arc<str>; 4]> = SmallVec::new();
        let mut links: SmallVec<[ParentLink; 1]> = SmallVec::new();
        // Module for the previous prefix, and whether we created it.
        let mut parent: Option<(Arc<ModuleObject>, bool)> = None;

        for (i, part, prefix) in dotted.prefixes() {
            if let Some(existing) = self.registry.get(&prefix) {
                trace!(module = %prefix, "module already registered");
                if let Some((stub, true)) = &parent {
                    self.bind_child(stub, part, &existing);
                }
                parent = Some((existing, false));
                continue;
            }

            let stub = self.new_stub(&prefix, i + 1 == depth);
            self.registry.insert(Arc::clone(&prefix), Arc::clone(&stub));
            debug!(module = %prefix, "registered placeholder module");

            match &parent {
                Some((owner, true)) => self.bind_child(owner, part, &stub),
                Some((base, false)) if self.config.link_existing_parent => {
                    links.push(self.link_parent(base, part, &stub));
                }
                _ => {}
            }

            created.push(prefix);
            parent = Some((stub, true));
        }

        debug!(path = %dotted, created = created.len(), "surrogate registered");
        Ok(Registration {
            path: dotted,
            created,
            links,
        })
    }

    /// Undo exactly what `registration` did.
    ///
    /// Created names are removed newest first; a name that disappeared from
    /// the registry in the meantime is skipped. Parent attribute changes are
    /// then reverted, newest first.
    pub fn teardown(&self, registration: Registration) {
        let Registration {
            path,
            created,
            links,
        } = registration;

        for name in created.iter().rev() {
            if self.registry.remove(name).is_some() {
                debug!(module = %name, "removed placeholder module");
            } else {
                warn!(module = %name, "placeholder module vanished before teardown");
            }
        }

        for link in links.into_iter().rev() {
            link.restore();
        }

        debug!(path = %path, removed = created.len(), "surrogate torn down");
    }

    /// Build an empty placeholder for `name`.
    fn new_stub(&self, name: &Arc<str>, is_leaf: bool) -> Arc<ModuleObject> {
        let stub = ModuleObject::shared(Arc::clone(name));
        if self.config.export_names {
            stub.set_attr(ALL_ATTR, AttrValue::List(Vec::new()));
        }
        if self.config.mark_packages && !is_leaf {
            stub.set_attr(PATH_ATTR, AttrValue::List(Vec::new()));
        }
        stub
    }

    /// Bind `child` under `name` on a stub this registration owns.
    fn bind_child(&self, owner: &ModuleObject, name: &Arc<str>, child: &Arc<ModuleObject>) {
        owner.set_attr(name, Arc::clone(child));
        if self.config.export_names {
            append_export(owner, name);
        }
    }

    /// Bind `stub` under `name` on a module this registration does not own,
    /// remembering what to put back.
    fn link_parent(
        &self,
        base: &Arc<ModuleObject>,
        name: &Arc<str>,
        stub: &Arc<ModuleObject>,
    ) -> ParentLink {
        let previous_attr = base.set_attr(name, Arc::clone(stub));

        // Only an existing list `__all__` is extended; a module without one
        // keeps exporting its public names.
        let exported = self.config.export_names
            && base.exported_names().is_some()
            && append_export(base, name);

        debug!(module = base.name(), attr = %name, "linked placeholder onto existing module");
        ParentLink {
            module: Arc::clone(base),
            attr: Arc::clone(name),
            stub: Arc::clone(stub),
            previous_attr,
            exported,
        }
    }
}

/// Add `name` to `module.__all__`, creating the list if needed.
///
/// Returns whether `name` was added.
fn append_export(module: &ModuleObject, name: &Arc<str>) -> bool {
    let mut names = module.exported_names().unwrap_or_default();
    if names.iter().any(|n| n == name) {
        return false;
    }
    names.push(Arc::clone(name));
    module.set_attr(ALL_ATTR, AttrValue::List(names));
    true
}

// =============================================================================
// Tests
// =============================================================================
