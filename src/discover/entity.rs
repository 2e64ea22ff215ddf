//! Entity-level directive parsing.
//!
//! Parses `#[dto(...)]` attributes with darling and combines them with
//! the parsed field list into an `(Entity, Directive)` pair.

use darling::{FromDeriveInput, util::PathList};
use syn::{DeriveInput, ItemStruct, Meta};

use crate::model::{Directive, Entity};

use super::field::parse_field;

/// `#[dto(...)]` attributes as written on the declaration.
///
/// Internal struct used by darling for parsing; discovery converts it
/// into the public [`Directive`].
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(dto), supports(struct_named))]
struct DtoAttrs {
    /// Generate the write DTO. Defaults to enabled.
    #[darling(default = "enabled")]
    write: bool,

    /// Generate the read DTO. Defaults to enabled.
    #[darling(default = "enabled")]
    read: bool,

    /// Field names excluded from both DTOs, e.g.
    /// `exclude(internal_code, password_hash)`.
    exclude: Option<PathList>,
}

/// Directive flags default to enabled when omitted.
fn enabled() -> bool {
    true
}

/// Parse one directive-carrying struct into an entity/directive pair.
///
/// # Errors
///
/// - Tuple or unit struct (named fields required)
/// - Invalid directive attribute values
pub(super) fn parse_struct(
    package: &str,
    item: &ItemStruct,
) -> darling::Result<(Entity, Directive)> {
    let fields = match &item.fields {
        syn::Fields::Named(named) => named.named.iter().map(parse_field).collect(),
        _ => {
            return Err(
                darling::Error::custom("dto requires named fields").with_span(&item.ident)
            );
        }
    };

    let directive = parse_directive(item)?;

    let entity = Entity {
        name: item.ident.to_string(),
        package: package.to_string(),
        fields,
    };

    Ok((entity, directive))
}

/// A bare `#[dto]` keeps every default; `#[dto(...)]` goes through
/// darling.
fn parse_directive(item: &ItemStruct) -> darling::Result<Directive> {
    let has_args = item
        .attrs
        .iter()
        .any(|attr| attr.path().is_ident("dto") && matches!(attr.meta, Meta::List(_)));

    if !has_args {
        return Ok(Directive::default());
    }

    let input = DeriveInput::from(item.clone());
    let attrs = DtoAttrs::from_derive_input(&input)?;

    Ok(Directive {
        write: attrs.write,
        read: attrs.read,
        exclude: attrs
            .exclude
            .as_ref()
            .map(PathList::to_strings)
            .unwrap_or_default(),
    })
}
