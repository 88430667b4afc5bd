//! `ModuleObject` - runtime representation of a module.
//!
//! A module is a name plus a mutable attribute namespace. Real modules and
//! placeholder stubs share this representation; a stub is simply a module
//! whose namespace holds nothing but metadata and links to its children.

use crate::value::AttrValue;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Attribute holding the fully-qualified module name.
pub const NAME_ATTR: &str = "__name__";
/// Attribute listing the names exported by `from module import *`.
pub const ALL_ATTR: &str = "__all__";
/// Attribute whose presence marks a module as a package.
pub const PATH_ATTR: &str = "__path__";

// =============================================================================
// ModuleObject
// =============================================================================

/// A module object with attribute storage.
///
/// - Identity is the `Arc` it lives in; the registry and parent modules hold
///   clones of that `Arc`.
/// - Attribute access goes through a `parking_lot::RwLock`, so a module can
///   be shared across threads and mutated through `&self`.
#[derive(Debug)]
pub struct ModuleObject {
    /// Fully-qualified module name (e.g., "os.path").
    name: Arc<str>,

    /// Module attributes, including `__name__`.
    attrs: RwLock<FxHashMap<Arc<str>, AttrValue>>,
}

impl ModuleObject {
    /// Create a new module with only `__name__` set.
    #[inline]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let mut attrs = FxHashMap::default();
        attrs.insert(Arc::from(NAME_ATTR), AttrValue::Str(Arc::clone(&name)));

        Self {
            name,
            attrs: RwLock::new(attrs),
        }
    }

    /// Create a module and wrap it for sharing.
    #[inline]
    pub fn shared(name: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new(Self::new(name))
    }

    /// Get the module name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an attribute from the module.
    ///
    /// Returns `None` if the attribute doesn't exist.
    #[inline]
    pub fn get_attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.read().get(name).cloned()
    }

    /// Set an attribute, returning the value it replaced.
    #[inline]
    pub fn set_attr(&self, name: &str, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.attrs.write().insert(Arc::from(name), value.into())
    }

    /// Check if the module has an attribute.
    #[inline]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.read().contains_key(name)
    }

    /// Delete an attribute, returning the removed value.
    #[inline]
    pub fn del_attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.write().remove(name)
    }

    /// Get a submodule bound as an attribute.
    #[inline]
    pub fn submodule(&self, name: &str) -> Option<Arc<ModuleObject>> {
        match self.attrs.read().get(name) {
            Some(AttrValue::Module(m)) => Some(Arc::clone(m)),
            _ => None,
        }
    }

    /// Whether the module carries `__path__`, i.e. can contain submodules.
    #[inline]
    pub fn is_package(&self) -> bool {
        self.has_attr(PATH_ATTR)
    }

    /// Get all attribute names, sorted.
    ///
    /// This is used for `dir(module)`.
    pub fn dir(&self) -> Vec<Arc<str>> {
        let mut names: Vec<_> = self.attrs.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Get all public attribute names (for `import *`).
    ///
    /// If `__all__` is a name list, returns those names in order.
    /// Otherwise, returns all names not starting with underscore, sorted.
    pub fn public_names(&self) -> Vec<Arc<str>> {
        if let Some(names) = self.exported_names() {
            return names;
        }
        let mut names: Vec<_> = self
            .attrs
            .read()
            .keys()
            .filter(|k| !k.starts_with('_'))
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Get the `__all__` list, if it is set to a name list.
    pub fn exported_names(&self) -> Option<Vec<Arc<str>>> {
        match self.attrs.read().get(ALL_ATTR) {
            Some(AttrValue::List(names)) => Some(names.clone()),
            _ => None,
        }
    }

    /// Get the number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attrs.read().len()
    }

    /// Check if the module has no attributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attrs.read().is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_new() {
        let module = ModuleObject::new("test_module");
        assert_eq!(module.name(), "test_module");
        assert_eq!(
            module.get_attr(NAME_ATTR).unwrap().as_str(),
            Some("test_module")
        );
        assert!(!module.is_package());
    }

    #[test]
    fn test_module_get_set_attr() {
        let module = ModuleObject::new("test");
        assert!(module.set_attr("foo", 42i64).is_none());
        assert!(module.has_attr("foo"));
        assert_eq!(module.get_attr("foo").unwrap().as_int(), Some(42));

        let previous = module.set_attr("foo", 43i64).unwrap();
        assert_eq!(previous.as_int(), Some(42));
    }

    #[test]
    fn test_module_del_attr() {
        let module = ModuleObject::new("test");
        module.set_attr("bar", 100i64);
        assert!(module.del_attr("bar").is_some());
        assert!(!module.has_attr("bar"));
        assert!(module.del_attr("bar").is_none());
    }

    #[test]
    fn test_module_submodule() {
        let parent = ModuleObject::new("pkg");
        let child = ModuleObject::shared("pkg.child");
        parent.set_attr("child", Arc::clone(&child));
        parent.set_attr("flag", true);

        assert!(Arc::ptr_eq(&parent.submodule("child").unwrap(), &child));
        assert!(parent.submodule("flag").is_none());
        assert!(parent.submodule("missing").is_none());
    }

    #[test]
    fn test_module_dir_sorted() {
        let module = ModuleObject::new("test");
        module.set_attr("beta", 2i64);
        module.set_attr("alpha", 1i64);
        let names: Vec<_> = module.dir().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["__name__", "alpha", "beta"]);
    }

    #[test]
    fn test_module_public_names_without_all() {
        let module = ModuleObject::new("test");
        module.set_attr("public", 1i64);
        module.set_attr("_private", 2i64);
        module.set_attr("__dunder__", 3i64);

        let public = module.public_names();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].as_ref(), "public");
    }

    #[test]
    fn test_module_public_names_honours_all() {
        let module = ModuleObject::new("test");
        module.set_attr("a", 1i64);
        module.set_attr("b", 2i64);
        module.set_attr(ALL_ATTR, AttrValue::names(["b"]));

        let public = module.public_names();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].as_ref(), "b");
    }

    #[test]
    fn test_module_len_and_is_empty() {
        let module = ModuleObject::new("test");
        assert!(!module.is_empty());
        assert_eq!(module.len(), 1);
    }

    #[test]
    fn test_module_concurrent_access() {
        use std::thread;

        let module = ModuleObject::shared("concurrent");

        let handles: Vec<_> = (0..10i64)
            .map(|i| {
                let m = Arc::clone(&module);
                thread::spawn(move || {
                    m.set_attr(&format!("attr_{}", i), i);
                    m.get_attr(&format!("attr_{}", i))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }

        for i in 0..10 {
            assert!(module.has_attr(&format!("attr_{}", i)));
        }
    }
}
