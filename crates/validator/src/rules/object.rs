//! Registered-class object validation

use crate::class::ClassId;
use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::executor::run_chain;
use crate::rule::Rule;
use crate::rules::check_depth;
use crate::value::{Object, Value};
use async_trait::async_trait;
use tracing::trace;

/// Validates a keyed structure against a registered class.
///
/// The class is named through a thunk that is only called at validation
/// time, so classes can refer to each other (or themselves) regardless of
/// registration order.
///
/// Steps, in order:
/// 1. resolve the class registration (`unregistered_class` if missing);
/// 2. require a [`Value::Object`] input (`type_mismatch` otherwise);
/// 3. run each declared field through its rule chain, absent keys as
///    [`Value::Undefined`];
/// 4. build a new object holding only declared fields, in declaration
///    order, leaving out fields that validated to `Undefined`;
/// 5. hand that object to the class post-check, if any.
///
/// Field failures carry the field name in their path. Under the default
/// fail-fast policy the first failing field is returned; with
/// [`FieldFailurePolicy::CollectAll`](crate::FieldFailurePolicy::CollectAll)
/// all field failures are wrapped in one `object_invalid` error.
pub struct IsObject<F> {
    class: F,
}

impl<F> std::fmt::Debug for IsObject<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsObject")
            .field("class", &"<thunk>")
            .finish()
    }
}

#[async_trait]
impl<F> Rule for IsObject<F>
where
    F: Fn() -> ClassId + Send + Sync,
{
    fn name(&self) -> &str {
        "is_object"
    }

    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        let id = (self.class)();
        let Some(descriptor) = ctx.registry().get(&id) else {
            return Err(ValidateError::unregistered_class(id.to_string()));
        };

        let mut input = match value {
            Value::Object(object) => object,
            other => return Err(ValidateError::type_mismatch("object", other.kind())),
        };
        check_depth(ctx)?;

        trace!(class = %id, path = %ctx.path(), "validating object");

        let collect_all = ctx.config().collects_all();
        let mut output = Object::with_capacity(descriptor.fields().len());
        let mut errors = Vec::new();

        for field in descriptor.fields() {
            let raw = input.swap_remove(field.key()).unwrap_or_default();
            match run_chain(raw, field.rules(), &ctx.field(field.key())).await {
                Ok(Value::Undefined) => {}
                Ok(validated) => {
                    output.insert(field.key().to_owned(), validated);
                }
                Err(error) => {
                    let error = error.at_key(field.key());
                    if !collect_all {
                        return Err(error);
                    }
                    errors.push(error);
                }
            }
        }

        if !errors.is_empty() {
            return Err(ValidateError::object_invalid(id.to_string(), errors));
        }

        match descriptor.post_check() {
            Some(check) => check.check(output).await,
            None => Ok(Value::Object(output)),
        }
    }
}

/// Creates an [`IsObject`] rule.
///
/// ```rust
/// use dtokit_validator::ClassId;
/// use dtokit_validator::rules::is_object;
///
/// struct AddressDto;
///
/// let by_tag = is_object(|| ClassId::new("UserDto"));
/// let by_type = is_object(ClassId::of::<AddressDto>);
/// ```
pub fn is_object<F>(class: F) -> IsObject<F>
where
    F: Fn() -> ClassId + Send + Sync,
{
    IsObject { class }
}
