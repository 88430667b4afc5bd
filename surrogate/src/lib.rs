//! Placeholder modules for names that do not exist.
//!
//! Code under test sometimes imports modules that are unavailable in the
//! test environment (platform-specific or production-only). `surrogate`
//! registers empty stand-in modules for every missing segment of a dotted
//! path, for exactly the duration of a scope, and then removes exactly what
//! it added. Modules that were already registered are reused and never
//! replaced.
//!
//! ```ignore
//! use surrogate::surrogate;
//! use surrogate_core::{ImportResolver, sys_modules};
//!
//! let test = surrogate("sys.my.cool.module1").wrap(
//!     sys_modules(),
//!     surrogate("sys.my.cool.module2").wrap(sys_modules(), |()| {
//!         let resolver = ImportResolver::new(sys_modules());
//!         let cool = resolver.import_module("sys.my.cool")?;
//!         resolver.import_submodule(&cool, "module1")?;
//!         resolver.import_submodule(&cool, "module2")?;
//!         Ok::<_, surrogate::SurrogateError>(())
//!     }),
//! );
//! test(())?;
//! ```
//!
//! # Concurrency
//!
//! The registry is shared process state. Scopes registering overlapping
//! paths from several threads at once are not coordinated and must be
//! serialized by the caller.

pub mod config;
pub mod error;
pub mod guard;
pub mod inject;
pub mod logging;
pub mod registrar;
pub mod scope;

pub use config::SurrogateConfig;
pub use error::{SurrogateError, SurrogateResult};
pub use guard::SurrogateGuard;
pub use inject::{Injected, import_or_inject, import_or_inject_with};
pub use registrar::{Registrar, Registration};
pub use scope::{Surrogate, surrogate};
