//! Module objects and the module registry.
//!
//! This crate holds the runtime side that surrogate stubs plug into:
//!
//! ```text
//! SysModules (ModuleRegistry)
//!   ├── "sys"          → ModuleObject
//!   ├── "sys.fake"     → ModuleObject { fake.mod → ... }
//!   └── "sys.fake.mod" → ModuleObject
//!
//! ImportResolver
//!   ├── import_module  (registry lookup of every prefix)
//!   └── import_from    (attribute traversal, registry fallback)
//! ```

pub mod module_object;
pub mod package;
pub mod registry;
pub mod resolver;
pub mod value;


pub use module_object::{ALL_ATTR, ModuleObject, NAME_ATTR, PATH_ATTR};
pub use package::{DottedName, is_identifier};
pub use registry::{ModuleRegistry, SysModules, sys_modules};
pub use resolver::{ImportError, ImportResolver, ImportResult};
pub use value::AttrValue;
