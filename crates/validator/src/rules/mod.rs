//! Built-in rules
//!
//! - **Coercion**: [`to_string`], [`to_number`], [`to_boolean`]
//! - **Membership**: [`to_enum`] over an [`EnumDescriptor`]
//! - **Structure**: [`is_object`] (registered classes), [`is_array`]
//! - **Presence**: [`optional`], [`nullable`]
//! - **Custom**: [`custom`], [`custom_async`]

pub mod array;
pub mod boolean;
pub mod custom;
pub mod enumeration;
pub mod number;
pub mod object;
pub mod presence;
pub mod string;

pub use array::{IsArray, is_array};
pub use boolean::{CoerceBoolean, to_boolean};
pub use custom::{Custom, CustomAsync, custom, custom_async};
pub use enumeration::{EnumDescriptor, EnumMember, to_enum};
pub use number::{CoerceNumber, to_number};
pub use object::{IsObject, is_object};
pub use presence::{Nullable, Optional, nullable, optional};
pub use string::{CoerceString, to_string};

use crate::context::RuleContext;
use crate::error::ValidateError;

/// Fails when entering one more level would exceed the configured depth.
pub(crate) fn check_depth(ctx: &RuleContext<'_>) -> Result<(), ValidateError> {
    let max_depth = ctx.config().max_depth;
    if ctx.depth() >= max_depth {
        return Err(ValidateError::max_depth_exceeded(max_depth));
    }
    Ok(())
}
