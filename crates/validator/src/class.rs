//! Class descriptors
//!
//! A class descriptor is the explicit replacement for per-property
//! annotations: a table of field rule chains plus an optional whole-object
//! post-check, keyed by a [`ClassId`].
//!
//! ```rust
//! use dtokit_validator::{rules, ClassDescriptor, ClassId, ValidateError, Value};
//! use dtokit_validator::rules::to_string;
//!
//! let descriptor = ClassDescriptor::builder(ClassId::new("BasicDto"))
//!     .field("name", rules![to_string()])
//!     .class_validate(|object| {
//!         if object.get("name") == Some(&Value::from("InvalidName")) {
//!             return Err(ValidateError::custom("name must not be 'InvalidName'"));
//!         }
//!         Ok(Value::Object(object))
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(descriptor.fields().len(), 1);
//! assert!(descriptor.has_post_check());
//! ```

use crate::error::{DefinitionError, ValidateError};
use crate::rule::RuleRef;
use crate::value::{Object, Value};
use async_trait::async_trait;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

// ============================================================================
// CLASS ID
// ============================================================================

/// Stable identity of a registered class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Cow<'static, str>);

impl ClassId {
    /// Identity from a string tag.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Identity derived from a Rust type.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ClassId {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

// ============================================================================
// POST-CHECK
// ============================================================================

/// Whole-object check run after every field passed.
///
/// Receives the built object (declared fields only) and returns the final
/// value, which may differ from the input.
#[async_trait]
pub trait PostCheck: Send + Sync {
    async fn check(&self, object: Object) -> Result<Value, ValidateError>;
}

struct SyncPostCheck<F>(F);

#[async_trait]
impl<F> PostCheck for SyncPostCheck<F>
where
    F: Fn(Object) -> Result<Value, ValidateError> + Send + Sync,
{
    async fn check(&self, object: Object) -> Result<Value, ValidateError> {
        (self.0)(object)
    }
}

struct AsyncPostCheck<F, Fut> {
    check: F,
    _future: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<F, Fut> PostCheck for AsyncPostCheck<F, Fut>
where
    F: Fn(Object) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ValidateError>> + Send,
{
    async fn check(&self, object: Object) -> Result<Value, ValidateError> {
        (self.check)(object).await
    }
}

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// A property key bound to its ordered rule chain.
#[derive(Clone)]
pub struct FieldDescriptor {
    key: String,
    rules: Vec<RuleRef>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, rules: Vec<RuleRef>) -> Self {
        Self {
            key: key.into(),
            rules,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("rules", &names)
            .finish()
    }
}

// ============================================================================
// CLASS DESCRIPTOR
// ============================================================================

/// Everything the engine knows about one class.
///
/// Immutable once built; shared through the registry as `Arc`.
pub struct ClassDescriptor {
    id: ClassId,
    fields: Vec<FieldDescriptor>,
    post_check: Option<Arc<dyn PostCheck>>,
}

impl ClassDescriptor {
    /// Starts a descriptor for `id`.
    pub fn builder(id: impl Into<ClassId>) -> ClassDescriptorBuilder {
        ClassDescriptorBuilder::new(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &ClassId {
        &self.id
    }

    /// Declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    #[must_use]
    pub fn has_post_check(&self) -> bool {
        self.post_check.is_some()
    }

    #[must_use]
    pub fn post_check(&self) -> Option<&Arc<dyn PostCheck>> {
        self.post_check.as_ref()
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("id", &self.id)
            .field("fields", &self.fields)
            .field("post_check", &self.post_check.is_some())
            .finish()
    }
}

/// Builder for [`ClassDescriptor`].
///
/// Declaration problems are recorded and reported by [`build`](Self::build),
/// so the chain stays fluent.
#[must_use = "builders do nothing unless built"]
pub struct ClassDescriptorBuilder {
    id: ClassId,
    fields: Vec<FieldDescriptor>,
    post_check: Option<Arc<dyn PostCheck>>,
    error: Option<DefinitionError>,
}

impl ClassDescriptorBuilder {
    fn new(id: ClassId) -> Self {
        Self {
            id,
            fields: Vec::new(),
            post_check: None,
            error: None,
        }
    }

    /// Declares a field and its rule chain.
    pub fn field(mut self, key: impl Into<String>, rules: Vec<RuleRef>) -> Self {
        let key = key.into();
        if self.fields.iter().any(|f| f.key == key) {
            let class = self.id.to_string();
            self.fail(DefinitionError::DuplicateField { class, field: key });
        } else {
            self.fields.push(FieldDescriptor::new(key, rules));
        }
        self
    }

    /// Attaches a synchronous post-check hook.
    pub fn class_validate<F>(self, check: F) -> Self
    where
        F: Fn(Object) -> Result<Value, ValidateError> + Send + Sync + 'static,
    {
        self.post_check(Arc::new(SyncPostCheck(check)))
    }

    /// Attaches an asynchronous post-check hook.
    pub fn class_validate_async<F, Fut>(self, check: F) -> Self
    where
        F: Fn(Object) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ValidateError>> + Send + 'static,
    {
        self.post_check(Arc::new(AsyncPostCheck {
            check,
            _future: PhantomData,
        }))
    }

    /// Attaches a post-check implementation.
    pub fn post_check(mut self, check: Arc<dyn PostCheck>) -> Self {
        if self.post_check.is_some() {
            let class = self.id.to_string();
            self.fail(DefinitionError::DuplicatePostCheck(class));
        } else {
            self.post_check = Some(check);
        }
        self
    }

    fn fail(&mut self, error: DefinitionError) {
        // First problem wins; later ones are usually consequences.
        self.error.get_or_insert(error);
    }

    /// Finishes the descriptor.
    pub fn build(self) -> Result<ClassDescriptor, DefinitionError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.id.as_str().is_empty() {
            return Err(DefinitionError::EmptyClassId);
        }
        Ok(ClassDescriptor {
            id: self.id,
            fields: self.fields,
            post_check: self.post_check,
        })
    }
}
