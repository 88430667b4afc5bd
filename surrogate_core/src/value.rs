//! `AttrValue` - values stored in a module's attribute namespace.
//!
//! Modules only need a handful of value kinds: metadata strings such as
//! `__name__`, name lists such as `__all__` and `__path__`, nested module
//! references for package traversal, and the odd scalar a test attaches.

use crate::module_object::ModuleObject;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// AttrValue
// =============================================================================

/// A value bound to a module attribute.
///
/// Module references are shared: cloning an `AttrValue::Module` clones the
/// `Arc`, not the module. Equality on modules is identity.
#[derive(Clone)]
pub enum AttrValue {
    None,
    Bool(bool),
    Int(i64),
    Str(Arc<str>),
    /// Ordered list of names (`__all__`, `__path__`).
    List(Vec<Arc<str>>),
    Module(Arc<ModuleObject>),
}

impl AttrValue {
    /// Build a name list from anything yielding string-likes.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::List(names.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Arc<str>]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_module(&self) -> Option<&Arc<ModuleObject>> {
        match self {
            Self::Module(m) => Some(m),
            _ => None,
        }
    }

    /// Python-ish type name, used in [`ImportError::NotAModule`].
    ///
    /// [`ImportError::NotAModule`]: crate::ImportError::NotAModule
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Module(_) => "module",
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Module(a), Self::Module(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Modules print as `<module 'a.b'>` so that nested packages don't recurse.
impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::List(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Module(m) => write!(f, "<module '{}'>", m.name()),
        }
    }
}

impl From<Arc<ModuleObject>> for AttrValue {
    #[inline]
    fn from(module: Arc<ModuleObject>) -> Self {
        Self::Module(module)
    }
}

impl From<bool> for AttrValue {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttrValue {
    #[inline]
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for AttrValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_equality_is_identity() {
        let a = Arc::new(ModuleObject::new("a"));
        let b = Arc::new(ModuleObject::new("a"));
        assert_eq!(AttrValue::Module(Arc::clone(&a)), AttrValue::Module(a));
        assert_ne!(
            AttrValue::Module(Arc::new(ModuleObject::new("a"))),
            AttrValue::Module(b)
        );
    }

    #[test]
    fn test_names_builds_list() {
        let v = AttrValue::names(["one", "two"]);
        let list = v.as_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].as_ref(), "two");
    }

    #[test]
    fn test_debug_does_not_recurse_into_modules() {
        let m = Arc::new(ModuleObject::new("pkg.sub"));
        assert_eq!(format!("{:?}", AttrValue::from(m)), "<module 'pkg.sub'>");
        assert_eq!(format!("{:?}", AttrValue::Bool(false)), "False");
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let v = AttrValue::from(7i64);
        assert_eq!(v.as_int(), Some(7));
        assert!(v.as_str().is_none());
        assert!(v.as_module().is_none());
        assert_eq!(v.type_name(), "int");
    }
}
