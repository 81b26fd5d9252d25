//! Macros for code generation in document types.
//!
//! This module provides macros to reduce boilerplate in the document model and
//! its builder, which share a long list of optional text properties.

/// Macro to generate `Option<&str>` getters for `Option<String>` fields.
///
/// Doc comments placed before each field name are carried onto the getter.
///
/// # Example
///
/// ```ignore
/// impl MyDocument {
///     text_getters! {
///         /// Publisher name.
///         publisher,
///     }
/// }
/// ```
macro_rules! text_getters {
    ($($(#[$meta:meta])* $field:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $field(&self) -> Option<&str> {
                self.$field.as_deref()
            }
        )*
    };
}

/// Macro to generate consuming builder setters for `Option<String>` fields.
///
/// Values are trimmed; blank values clear the field.
macro_rules! text_setters {
    ($($(#[$meta:meta])* $field:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$field = $crate::macros::non_blank(value.into());
                self
            }
        )*
    };
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
