//! Field-level marker parsing.

use quote::ToTokens;

use crate::model::Field;

/// Parse one named field, reading the `#[generated]` marker.
///
/// The field type is captured as token text and passed through to
/// generated code unchanged.
///
/// # Panics
///
/// Panics if the field has no identifier (tuple struct field). This is
/// caught earlier by darling's `supports(struct_named)`.
pub(super) fn parse_field(field: &syn::Field) -> Field {
    let name = field
        .ident
        .as_ref()
        .expect("named field required")
        .to_string();

    let generated = field
        .attrs
        .iter()
        .any(|attr| attr.path().is_ident("generated"));

    Field {
        name,
        ty: field.ty.to_token_stream().to_string(),
        generated,
    }
}
