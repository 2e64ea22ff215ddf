//! Field classification: entity fields into write/read subsets.

use crate::model::{Directive, Entity, Field};

/// Ordered write/read field subsets derived from one entity.
///
/// Derived, never stored: built fresh from `(Entity, Directive)` at the
/// start of each entity's pipeline. Both subsets preserve declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFields {
    /// Caller-supplied fields: not generated, not excluded.
    pub write_fields: Vec<Field>,

    /// Exposed fields: everything not excluded.
    pub read_fields: Vec<Field>,
}

/// Split an entity's fields into DTO subsets.
///
/// Rules, applied independently per field:
///
/// - write: `!generated` and not excluded
/// - read: not excluded
///
/// There are no error conditions. An entity with zero eligible fields
/// for a DTO yields an empty subset; the DTO is still generated when
/// its directive flag is enabled.
pub fn classify(entity: &Entity, directive: &Directive) -> ClassifiedFields {
    let write_fields = entity
        .fields
        .iter()
        .filter(|f| !f.generated && !directive.excludes(&f.name))
        .cloned()
        .collect();

    let read_fields = entity
        .fields
        .iter()
        .filter(|f| !directive.excludes(&f.name))
        .cloned()
        .collect();

    ClassifiedFields {
        write_fields,
        read_fields,
    }
}
