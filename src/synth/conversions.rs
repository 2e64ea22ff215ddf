//! Conversion function synthesis.
//!
//! Builds the two conversions between an entity and its DTOs:
//! `to_read_dto` (entity → read DTO) and `to_entity` (write DTO →
//! entity, with extra parameters for system-assigned fields).

use thiserror::Error;

use crate::model::{Directive, Entity, Field};

use super::types::{DtoField, DtoKind};

/// Which conversion a [`GeneratedConversion`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// `&Entity -> ReadDto`.
    ToReadDto,
    /// `WriteDto -> Entity`, consuming the DTO.
    ToEntity,
}

impl ConversionKind {
    pub fn function_name(self) -> &'static str {
        match self {
            Self::ToReadDto => "to_read_dto",
            Self::ToEntity => "to_entity",
        }
    }
}

/// Where one target field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Read from the receiver (`self.<field>`).
    Receiver,
    /// Supplied by the caller through an extra parameter.
    Parameter,
    /// Filled with `Default::default()`; used for excluded `Option`
    /// fields when reconstructing the entity.
    DefaultValue,
}

/// Mapping of one target field to its value source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub field: String,
    pub source: ValueSource,
}

/// Shape of one generated conversion function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConversion {
    pub kind: ConversionKind,
    pub function_name: String,
    pub receiver_type: String,
    pub return_type: String,
    /// Extra parameters, in declaration order. Populated only for
    /// `to_entity`: one entry per generated, non-excluded field.
    pub extra_params: Vec<DtoField>,
    /// One entry per target field, in the target's field order.
    pub mappings: Vec<FieldMapping>,
}

/// `to_entity` cannot construct the entity: an excluded field has no
/// value source.
///
/// The write DTO does not carry the field, no extra parameter supplies
/// it, and its type is not defaultable. Reported as an error-level
/// diagnostic; the conversion is not emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cannot generate `to_entity` for `{entity}`: field `{field}` is excluded but required to construct the entity"
)]
pub struct ConversionFault {
    pub entity: String,
    pub field: String,
}

/// Build the entity → read DTO conversion.
///
/// Every target field is read from the receiver under the same name.
/// Always buildable whenever the read DTO exists.
pub fn synthesize_to_read_dto(entity: &Entity, read_fields: &[Field]) -> GeneratedConversion {
    GeneratedConversion {
        kind: ConversionKind::ToReadDto,
        function_name: ConversionKind::ToReadDto.function_name().to_string(),
        receiver_type: entity.name.clone(),
        return_type: format!("{}{}", entity.name, DtoKind::Read.suffix()),
        extra_params: Vec::new(),
        mappings: read_fields
            .iter()
            .map(|f| FieldMapping {
                field: f.name.clone(),
                source: ValueSource::Receiver,
            })
            .collect(),
    }
}

/// Build the write DTO → entity conversion.
///
/// Takes the write DTO by value plus one extra parameter per generated,
/// non-excluded field. Every entity field is mapped in declaration
/// order:
///
/// - generated, not excluded: from the extra parameter
/// - not generated, not excluded: from the receiver
/// - excluded, `Option`-typed: `Default::default()`
/// - excluded otherwise: [`ConversionFault`], since the entity would
///   be missing a required value; the conversion is not emitted
///
/// Only buildable when the write DTO exists (`write = true`).
pub fn synthesize_to_entity(
    entity: &Entity,
    directive: &Directive,
) -> Result<GeneratedConversion, ConversionFault> {
    let mut extra_params = Vec::new();
    let mut mappings = Vec::new();

    for field in &entity.fields {
        let source = if directive.excludes(&field.name) {
            if field.is_option() {
                ValueSource::DefaultValue
            } else {
                return Err(ConversionFault {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                });
            }
        } else if field.generated {
            extra_params.push(DtoField::from(field));
            ValueSource::Parameter
        } else {
            ValueSource::Receiver
        };

        mappings.push(FieldMapping {
            field: field.name.clone(),
            source,
        });
    }

    Ok(GeneratedConversion {
        kind: ConversionKind::ToEntity,
        function_name: ConversionKind::ToEntity.function_name().to_string(),
        receiver_type: format!("{}{}", entity.name, DtoKind::Write.suffix()),
        return_type: entity.name.clone(),
        extra_params,
        mappings,
    })
}
