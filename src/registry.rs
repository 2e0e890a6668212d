//! The per-class declaration memo cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::class::{ClassDescriptor, ClassId, EnumClass, PermittedSet};
use crate::errors::DeclarationError;
use crate::provider::ValueSetProvider;

static GLOBAL: Lazy<EnumRegistry> = Lazy::new(EnumRegistry::new);

/// Memo of class declarations, keyed by identity.
///
/// Descriptors are computed once per identity and kept for the registry's
/// lifetime; [`invalidate`](EnumRegistry::invalidate) is the only eviction.
/// Lookups for identities with no typed declaration fall back to the
/// configured [`ValueSetProvider`], if any.
///
/// The cache is read-mostly. Concurrent first population of the same
/// identity recomputes redundantly; the derivation is pure, and the first
/// published descriptor wins.
pub struct EnumRegistry {
    provider: Option<Arc<dyn ValueSetProvider>>,
    cache: RwLock<HashMap<ClassId, Arc<ClassDescriptor>>>,
}

impl EnumRegistry {
    /// A registry with no provider fallback.
    pub fn new() -> Self {
        EnumRegistry {
            provider: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// A registry that resolves unknown identities through `provider`.
    pub fn with_provider(provider: Arc<dyn ValueSetProvider>) -> Self {
        EnumRegistry {
            provider: Some(provider),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide default used by the typed `EnumClass` operations.
    ///
    /// Created lazily on first use and never torn down; its cardinality is
    /// bounded by the enum classes the program declares.
    pub fn global() -> &'static EnumRegistry {
        &GLOBAL
    }

    /// Gets or builds the descriptor for the typed declaration `C`.
    pub fn ensure<C: EnumClass>(&self) -> Arc<ClassDescriptor> {
        let class = C::class_id();
        if let Some(found) = self.lookup(&class) {
            return found;
        }
        let descriptor = Arc::new(ClassDescriptor::new(
            class,
            PermittedSet::new(C::members()),
            C::ancestors(),
        ));
        tracing::debug!(
            class = class.name(),
            members = descriptor.permitted().len(),
            "declared enum class"
        );
        self.publish(class, descriptor)
    }

    /// Resolves an identity: memo first, then the provider fallback.
    pub fn descriptor(&self, class: &ClassId) -> Result<Arc<ClassDescriptor>, DeclarationError> {
        if let Some(found) = self.lookup(class) {
            return Ok(found);
        }
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| DeclarationError::unknown_class(class.name()))?;
        let members = provider.members_of(class)?;
        let ancestors = provider.ancestors_of(class)?;
        let descriptor = Arc::new(ClassDescriptor::new(
            *class,
            PermittedSet::new(members),
            ancestors,
        ));
        tracing::debug!(class = class.name(), "resolved enum class via provider");
        Ok(self.publish(*class, descriptor))
    }

    /// The permitted set for an identity.
    pub fn permitted(&self, class: &ClassId) -> Result<PermittedSet, DeclarationError> {
        Ok(self.descriptor(class)?.permitted().clone())
    }

    /// Drops the memoized descriptor; the next lookup recomputes it.
    pub fn invalidate(&self, class: &ClassId) {
        let removed = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(class);
        if removed.is_some() {
            tracing::debug!(class = class.name(), "invalidated enum class declaration");
        }
    }

    fn lookup(&self, class: &ClassId) -> Option<Arc<ClassDescriptor>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .cloned()
    }

    fn publish(&self, class: ClassId, descriptor: Arc<ClassDescriptor>) -> Arc<ClassDescriptor> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(class).or_insert(descriptor))
    }
}

impl std::fmt::Debug for EnumRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumRegistry")
            .field("has_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for EnumRegistry {
    fn default() -> Self {
        EnumRegistry::new()
    }
}
