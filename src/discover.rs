//! Declaration discovery: annotated source text → entity model.
//!
//! This module is the schema pass in front of the generation engine.
//! It parses a compilation unit with [`syn`], collects every
//! declaration carrying the `#[dto(...)]` directive, and produces
//! plain-data [`Entity`]/[`Directive`] pairs. Everything downstream
//! works on those values; the engine never inspects syntax.
//!
//! # Parsing Strategy
//!
//! Entity-level attributes like `#[dto(write = false, exclude(a, b))]`
//! are parsed using darling's `FromDeriveInput` derive macro, which
//! provides:
//!
//! - Default values for omitted flags (both DTOs enabled)
//! - Clear error messages for invalid input
//!
//! The field-level `#[generated]` attribute is a marker parsed by
//! presence check, since it carries no parameters.
//!
//! # Module Structure
//!
//! - [`entity`] - Entity-level directive parsing
//! - [`field`] - Field-level marker parsing

mod entity;
mod field;

use syn::Item;
use tracing::debug;

use crate::model::{Directive, Entity};

/// Result of scanning one compilation unit.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Valid generation targets, in declaration order.
    pub entities: Vec<(Entity, Directive)>,

    /// Declarations carrying the directive that are not valid targets.
    pub faults: Vec<UsageFault>,
}

/// A `#[dto]` directive applied to a declaration that cannot be a
/// generation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageFault {
    /// Name of the offending declaration.
    pub target: String,
    pub message: String,
}

/// Scan source text for declarations carrying the `#[dto]` directive.
///
/// Returns every valid `(Entity, Directive)` pair in declaration
/// order. Directives on non-struct declarations (enums, functions,
/// type aliases, ...) and malformed directives are surfaced as
/// [`UsageFault`]s, not silently dropped. Declarations without the
/// directive are ignored.
///
/// # Errors
///
/// Fails only when the source text is not parseable Rust.
pub fn discover(package: &str, source: &str) -> syn::Result<Discovery> {
    let file = syn::parse_file(source)?;
    let mut discovery = Discovery::default();

    for item in &file.items {
        match item {
            Item::Struct(item) if has_directive(&item.attrs) => {
                match entity::parse_struct(package, item) {
                    Ok(pair) => {
                        debug!(entity = %pair.0.name, package, "discovered entity");
                        discovery.entities.push(pair);
                    }
                    Err(err) => discovery.faults.push(UsageFault {
                        target: item.ident.to_string(),
                        message: err.to_string(),
                    }),
                }
            }
            _ => {
                if let Some((target, kind)) = directive_on_invalid_target(item) {
                    discovery.faults.push(UsageFault {
                        target,
                        message: format!("dto can only be applied to structs, found {kind}"),
                    });
                }
            }
        }
    }

    Ok(discovery)
}

fn has_directive(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("dto"))
}

/// Name and kind of a non-struct declaration carrying the directive.
fn directive_on_invalid_target(item: &Item) -> Option<(String, &'static str)> {
    let (attrs, name, kind) = match item {
        Item::Enum(i) => (&i.attrs, i.ident.to_string(), "an enum"),
        Item::Union(i) => (&i.attrs, i.ident.to_string(), "a union"),
        Item::Fn(i) => (&i.attrs, i.sig.ident.to_string(), "a function"),
        Item::Type(i) => (&i.attrs, i.ident.to_string(), "a type alias"),
        Item::Const(i) => (&i.attrs, i.ident.to_string(), "a constant"),
        Item::Static(i) => (&i.attrs, i.ident.to_string(), "a static"),
        Item::Trait(i) => (&i.attrs, i.ident.to_string(), "a trait"),
        Item::Mod(i) => (&i.attrs, i.ident.to_string(), "a module"),
        _ => return None,
    };

    has_directive(attrs).then_some((name, kind))
}
