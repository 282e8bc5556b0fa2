/// Hook registry entries.
///
/// A pre-hook runs synchronously before the underlying logger is called and
/// may replace the record. A post-hook runs after the call, in series with
/// the other post-hooks, and only observes.
use std::sync::Arc;

use axe_core::Method;

/// A registered hook, optionally restricted to one method.
pub struct HookEntry<H: ?Sized> {
    /// `None` fires for every method.
    pub filter: Option<Method>,
    pub hook: Arc<H>,
}

impl<H: ?Sized> HookEntry<H> {
    pub fn new(filter: Option<Method>, hook: Arc<H>) -> Self {
        Self { filter, hook }
    }

    pub fn applies_to(&self, method: Method) -> bool {
        self.filter.is_none_or(|only| only == method)
    }
}

impl<H: ?Sized> Clone for HookEntry<H> {
    fn clone(&self) -> Self {
        Self { filter: self.filter, hook: Arc::clone(&self.hook) }
    }
}
