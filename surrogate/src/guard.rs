//! `SurrogateGuard` - scope-bound placeholder modules.

use crate::registrar::{Registrar, Registration};
use std::sync::Arc;
use surrogate_core::ModuleRegistry;

/// Keeps one registration alive; tears it down on drop.
///
/// Dropping happens on every exit path of the owning scope, including
/// early `?` returns and panics unwinding through it. Guards over the same
/// registry may be dropped in any order; each one undoes only its own
/// changes.
#[must_use = "placeholder modules are removed as soon as the guard is dropped"]
pub struct SurrogateGuard<R: ModuleRegistry> {
    registrar: Registrar<R>,
    registration: Option<Registration>,
}

impl<R: ModuleRegistry> SurrogateGuard<R> {
    pub(crate) fn new(registrar: Registrar<R>, registration: Registration) -> Self {
        Self {
            registrar,
            registration: Some(registration),
        }
    }

    /// The registry the stubs live in.
    #[inline]
    pub fn registry(&self) -> &R {
        self.registrar.registry()
    }

    /// The registration this guard owns.
    #[inline]
    pub fn registration(&self) -> Option<&Registration> {
        self.registration.as_ref()
    }

    /// Names this guard inserted and will remove.
    #[inline]
    pub fn created(&self) -> &[Arc<str>] {
        self.registration
            .as_ref()
            .map(Registration::created)
            .unwrap_or(&[])
    }
}

impl<R: ModuleRegistry> Drop for SurrogateGuard<R> {
    fn drop(&mut self) {
        if let Some(registration) = self.registration.take() {
            self.registrar.teardown(registration);
        }
    }
}

impl<R: ModuleRegistry> std::fmt::Debug for SurrogateGuard<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurrogateGuard")
            .field("registration", &self.registration)
            .finish()
    }
}
