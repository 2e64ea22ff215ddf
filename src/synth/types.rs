//! DTO type shape synthesis.

use crate::model::{Entity, Field};

/// Which DTO variant a generated type or field set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtoKind {
    /// Caller-supplied payload used to create an entity.
    Write,
    /// Outgoing representation of an entity.
    Read,
}

impl DtoKind {
    /// Type name suffix for this variant.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Write => "WriteDto",
            Self::Read => "ReadDto",
        }
    }
}

/// One (name, type) slot of a generated type or parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtoField {
    pub name: String,
    pub ty: String,
}

impl From<&Field> for DtoField {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            ty: field.ty.clone(),
        }
    }
}

/// Shape of one generated DTO type: a flat value holder.
///
/// No default values, no validation, no inheritance. Field order
/// equals the entity's declaration order, filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    /// `<Entity>WriteDto` or `<Entity>ReadDto`.
    pub name: String,
    pub kind: DtoKind,
    /// Structural copies of the classified fields; types pass through
    /// unchanged.
    pub fields: Vec<DtoField>,
}

/// Build the DTO type shape for one classified field subset.
///
/// Only invoked for a kind whose directive flag is enabled; a disabled
/// flag suppresses the type and its conversion entirely.
pub fn synthesize_type(entity: &Entity, fields: &[Field], kind: DtoKind) -> GeneratedType {
    GeneratedType {
        name: format!("{}{}", entity.name, kind.suffix()),
        kind,
        fields: fields.iter().map(DtoField::from).collect(),
    }
}
