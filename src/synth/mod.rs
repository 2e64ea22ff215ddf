//! Synthesis of DTO type shapes and conversion functions.
//!
//! Everything here produces structured values ([`GeneratedType`],
//! [`GeneratedConversion`]); turning them into source text is the
//! renderer's job, so tests can assert on shapes without string
//! comparison.

mod conversions;
mod types;

pub use conversions::{
    ConversionFault, ConversionKind, FieldMapping, GeneratedConversion, ValueSource,
    synthesize_to_entity, synthesize_to_read_dto,
};
pub use types::{DtoField, DtoKind, GeneratedType, synthesize_type};
