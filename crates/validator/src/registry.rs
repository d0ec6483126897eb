//! Class registry
//!
//! Maps a [`ClassId`] to its [`ClassDescriptor`]. Registrations are
//! append-only: a class is registered once and never replaced or removed.
//! Validation only reads the registry, so concurrent validations share it
//! without coordination.
//!
//! Most programs use the process-wide instance ([`global_registry`] /
//! [`register_class`]). Isolated registries are useful in tests and for
//! plugin-style hosts that keep class sets apart.

use crate::class::{ClassDescriptor, ClassId};
use crate::error::DefinitionError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

static GLOBAL: LazyLock<Arc<ClassRegistry>> = LazyLock::new(|| Arc::new(ClassRegistry::new()));

/// Registry of class descriptors.
#[derive(Default)]
pub struct ClassRegistry {
    classes: DashMap<ClassId, Arc<ClassDescriptor>>,
}

impl ClassRegistry {
    /// Creates an empty, isolated registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor.
    ///
    /// Fails with [`DefinitionError::DuplicateClass`] when the id is already
    /// taken; the existing registration is left untouched.
    pub fn register(
        &self,
        descriptor: ClassDescriptor,
    ) -> Result<Arc<ClassDescriptor>, DefinitionError> {
        match self.classes.entry(descriptor.id().clone()) {
            Entry::Occupied(existing) => {
                debug!(class = %existing.key(), "rejecting duplicate class registration");
                Err(DefinitionError::DuplicateClass(existing.key().to_string()))
            }
            Entry::Vacant(slot) => {
                info!(
                    class = %descriptor.id(),
                    fields = descriptor.fields().len(),
                    post_check = descriptor.has_post_check(),
                    "registered class"
                );
                let descriptor = Arc::new(descriptor);
                slot.insert(Arc::clone(&descriptor));
                Ok(descriptor)
            }
        }
    }

    /// Looks up a descriptor.
    #[must_use]
    pub fn get(&self, id: &ClassId) -> Option<Arc<ClassDescriptor>> {
        self.classes.get(id).map(|entry| Arc::clone(entry.value()))
    }

    #[must_use]
    pub fn contains(&self, id: &ClassId) -> bool {
        self.classes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self.classes.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.ids())
            .finish()
    }
}

/// The process-wide registry.
#[must_use]
pub fn global_registry() -> Arc<ClassRegistry> {
    Arc::clone(&GLOBAL)
}

/// Registers a descriptor in the process-wide registry.
pub fn register_class(
    descriptor: ClassDescriptor,
) -> Result<Arc<ClassDescriptor>, DefinitionError> {
    GLOBAL.register(descriptor)
}
