//! Receiver-expression evaluation and host type reflection
//!
//! The engine never evaluates expressions itself. Missions that need a
//! receiver hand the captured expression text to an [`Evaluator`] the
//! host supplies at agent construction; the host decides what an
//! expression means in its runtime. Type checks on the resolved value go
//! through [`TypeDesc`] predicates so the host's notion of "instance of"
//! (including subtyping) stays in host code.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::EvalError;

/// A value resolved from a receiver expression.
///
/// Opaque to the engine; actions downcast it back to host types via
/// [`Input::object_as`](crate::input::Input::object_as).
pub type Value = Arc<dyn Any + Send + Sync>;

/// Host capability: resolve a textual expression to a live value.
///
/// Evaluation is synchronous and may carry side effects; any failure is
/// reported as an [`EvalError`]. The engine treats failures as "this
/// mission does not match" unless eval-debug is enabled.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<Value, EvalError>;
}

/// Map-backed evaluator resolving bare names to pre-bound values.
///
/// Useful as a host building block for shells whose completion context is
/// a known set of bindings, and as a test double. Unknown expressions
/// fail; bind `"self"` to give receiver-less method completion a current
/// context.
#[derive(Default)]
pub struct StaticEvaluator {
    bindings: HashMap<String, Value>,
}

impl StaticEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any existing binding.
    pub fn bind<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        self.bindings.insert(name.into(), Arc::new(value));
        self
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}

impl Evaluator for StaticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Value, EvalError> {
        self.bindings
            .get(expression)
            .cloned()
            .ok_or_else(|| EvalError::new(expression, "unknown expression"))
    }
}

/// A host type descriptor: a display name plus an instance predicate.
///
/// The predicate decides whether a [`Value`] counts as an instance of the
/// described type. [`TypeDesc::of`] gives exact-type semantics; hosts
/// model subtyping by supplying a looser predicate with
/// [`TypeDesc::with_check`].
#[derive(Clone)]
pub struct TypeDesc {
    name: String,
    check: Arc<dyn Fn(&(dyn Any + Send + Sync)) -> bool + Send + Sync>,
}

impl TypeDesc {
    /// Descriptor matching exactly the concrete type `T`.
    pub fn of<T: Any>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(|value| value.is::<T>()),
        }
    }

    /// Descriptor with a host-supplied instance predicate.
    pub fn with_check(
        name: impl Into<String>,
        check: impl Fn(&(dyn Any + Send + Sync)) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `value` is an instance of the described type.
    pub fn is_instance(&self, value: &Value) -> bool {
        (self.check)(value.as_ref())
    }
}

impl std::fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDesc").field("name", &self.name).finish()
    }
}

/// Registry resolving type names recorded in registrations to their
/// descriptors.
///
/// Populated at setup time by the host. Lookup of an unregistered name
/// returns `None`; ObjectMethod dispatch skips such entries, so a
/// registration naming an unknown type simply never matches. Hosts that
/// want loud failure can check [`TypeRegistry::get`] at setup.
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDesc>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own name.
    pub fn register(&mut self, desc: TypeDesc) -> &mut Self {
        self.types.insert(desc.name().to_string(), desc);
        self
    }

    /// Shorthand for registering an exact-type descriptor for `T`.
    pub fn register_type<T: Any>(&mut self, name: impl Into<String>) -> &mut Self {
        self.register(TypeDesc::of::<T>(name))
    }

    pub fn get(&self, name: &str) -> Option<&TypeDesc> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Session;
    struct Track {
        #[allow(dead_code)]
        id: u32,
    }

    #[test]
    fn test_static_evaluator_resolves_bindings() {
        let mut eval = StaticEvaluator::new();
        eval.bind("session", Session);
        let value = eval.evaluate("session").unwrap();
        assert!(value.is::<Session>());
    }

    #[test]
    fn test_static_evaluator_unknown_expression() {
        let eval = StaticEvaluator::new();
        let err = eval.evaluate("missing").unwrap_err();
        assert_eq!(err.expression, "missing");
    }

    #[test]
    fn test_type_desc_exact_match() {
        let desc = TypeDesc::of::<Track>("Track");
        let track: Value = Arc::new(Track { id: 7 });
        let session: Value = Arc::new(Session);
        assert!(desc.is_instance(&track));
        assert!(!desc.is_instance(&session));
    }

    #[test]
    fn test_type_desc_custom_check() {
        // a "Playable" that accepts both host types, like an interface
        let desc = TypeDesc::with_check("Playable", |v| v.is::<Track>() || v.is::<Session>());
        let track: Value = Arc::new(Track { id: 1 });
        assert!(desc.is_instance(&track));
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register_type::<Session>("Session");
        assert!(registry.get("Session").is_some());
        assert!(registry.get("Missing").is_none());
    }
}
