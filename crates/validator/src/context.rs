//! Per-call validation context
//!
//! A [`RuleContext`] travels down the rule chain. It gives rules access to the
//! class registry and the active [`ValidatorConfig`], and tracks where in the
//! input the current value lives so failures can report a field path.

use crate::config::ValidatorConfig;
use crate::registry::ClassRegistry;
use smallvec::SmallVec;
use std::fmt;

// ============================================================================
// FIELD PATH
// ============================================================================

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object property.
    Key(String),
    /// Array element.
    Index(usize),
}

/// Location of a value inside the validated input.
///
/// Renders as `user.tags[2].name`. Most paths are a few segments deep, so
/// they live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: SmallVec<[PathSegment; 4]>,
}

impl FieldPath {
    /// The empty path (the root value).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns a new path with `key` appended.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Key(key.into()));
        next
    }

    /// Returns a new path with `index` appended.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Index(index));
        next
    }

    /// Inserts a segment at the front.
    pub fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// Context handed to every [`Rule`](crate::Rule) invocation.
///
/// Cheap to derive: child contexts borrow the same registry and config and
/// only clone the path.
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    registry: &'a ClassRegistry,
    config: &'a ValidatorConfig,
    path: FieldPath,
    depth: usize,
}

impl<'a> RuleContext<'a> {
    /// Creates a root context.
    #[must_use]
    pub fn new(registry: &'a ClassRegistry, config: &'a ValidatorConfig) -> Self {
        Self {
            registry,
            config,
            path: FieldPath::root(),
            depth: 0,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &'a ClassRegistry {
        self.registry
    }

    #[must_use]
    pub fn config(&self) -> &'a ValidatorConfig {
        self.config
    }

    /// Path of the value currently being validated.
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Number of object/array levels entered so far.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for a property of the current object.
    #[must_use]
    pub fn field(&self, key: &str) -> Self {
        Self {
            registry: self.registry,
            config: self.config,
            path: self.path.key(key),
            depth: self.depth + 1,
        }
    }

    /// Context for an element of the current array.
    #[must_use]
    pub fn element(&self, index: usize) -> Self {
        Self {
            registry: self.registry,
            config: self.config,
            path: self.path.index(index),
            depth: self.depth + 1,
        }
    }
}
