//! Rendering structured generation results into Rust source text.
//!
//! Rendering is a pluggable capability behind the [`Renderer`] trait,
//! decoupled from classification and synthesis so the engine's tests
//! can assert on structured values instead of strings. [`RustRenderer`]
//! is the built-in implementation: it builds token streams with
//! [`quote`] and stringifies them.

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use thiserror::Error;

use crate::synth::{ConversionKind, DtoKind, GeneratedConversion, GeneratedType, ValueSource};

/// One rendered output unit, ready for a source writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    /// Namespace the unit belongs to (the entity's package).
    pub package: String,

    /// Unit name, e.g. `UserWriteDto` or `UserExtensions`.
    pub unit_name: String,

    /// Snake-cased destination file name, e.g. `user_write_dto.rs`.
    pub file_name: String,

    /// Rendered source text.
    pub text: String,
}

/// A structured value could not be turned into source text.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid identifier `{name}`")]
    InvalidIdent { name: String, source: syn::Error },

    #[error("invalid type reference `{ty}` on field `{field}`")]
    InvalidType {
        field: String,
        ty: String,
        source: syn::Error,
    },
}

/// Pluggable rendering capability, one implementation per target
/// language.
pub trait Renderer {
    /// Render one DTO type declaration.
    fn render_type(&self, package: &str, ty: &GeneratedType) -> Result<RenderedUnit, RenderError>;

    /// Render the `<Entity>Extensions` unit grouping the entity's
    /// conversion functions.
    fn render_extensions(
        &self,
        package: &str,
        entity_name: &str,
        conversions: &[GeneratedConversion],
    ) -> Result<RenderedUnit, RenderError>;
}

/// Renders generated units as Rust source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustRenderer;

impl Renderer for RustRenderer {
    fn render_type(&self, package: &str, ty: &GeneratedType) -> Result<RenderedUnit, RenderError> {
        let name = ident(&ty.name)?;

        let field_defs = ty
            .fields
            .iter()
            .map(|f| {
                let fname = ident(&f.name)?;
                let fty = type_ref(&f.name, &f.ty)?;
                Ok(quote! { pub #fname: #fty })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let tokens = match ty.kind {
            DtoKind::Write => quote! {
                /// Request payload carrying caller-supplied fields.
                #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
                pub struct #name {
                    #(#field_defs),*
                }
            },
            DtoKind::Read => quote! {
                /// Response payload carrying all exposed fields.
                #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
                pub struct #name {
                    #(#field_defs),*
                }
            },
        };

        Ok(unit(package, &ty.name, &tokens))
    }

    fn render_extensions(
        &self,
        package: &str,
        entity_name: &str,
        conversions: &[GeneratedConversion],
    ) -> Result<RenderedUnit, RenderError> {
        let mut tokens = TokenStream::new();
        for conv in conversions {
            tokens.extend(render_conversion(conv)?);
        }

        let unit_name = format!("{entity_name}Extensions");
        Ok(unit(package, &unit_name, &tokens))
    }
}

fn render_conversion(conv: &GeneratedConversion) -> Result<TokenStream, RenderError> {
    let receiver = ident(&conv.receiver_type)?;
    let ret = ident(&conv.return_type)?;
    let fn_name = ident(&conv.function_name)?;

    let assigns = conv
        .mappings
        .iter()
        .map(|m| {
            let field = ident(&m.field)?;
            Ok(match (conv.kind, m.source) {
                (ConversionKind::ToReadDto, ValueSource::Receiver) => {
                    quote! { #field: self.#field.clone() }
                }
                (ConversionKind::ToEntity, ValueSource::Receiver) => {
                    quote! { #field: self.#field }
                }
                (_, ValueSource::Parameter) => quote! { #field },
                (_, ValueSource::DefaultValue) => quote! { #field: Default::default() },
            })
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    let tokens = match conv.kind {
        ConversionKind::ToReadDto => quote! {
            impl #receiver {
                /// Convert the entity into its read DTO.
                pub fn #fn_name(&self) -> #ret {
                    #ret {
                        #(#assigns),*
                    }
                }
            }
        },
        ConversionKind::ToEntity => {
            let params = conv
                .extra_params
                .iter()
                .map(|p| {
                    let pname = ident(&p.name)?;
                    let pty = type_ref(&p.name, &p.ty)?;
                    Ok(quote! { #pname: #pty })
                })
                .collect::<Result<Vec<_>, RenderError>>()?;

            quote! {
                impl #receiver {
                    /// Construct the entity, supplying system-assigned values.
                    pub fn #fn_name(self #(, #params)*) -> #ret {
                        #ret {
                            #(#assigns),*
                        }
                    }
                }
            }
        }
    };

    Ok(tokens)
}

fn unit(package: &str, unit_name: &str, tokens: &TokenStream) -> RenderedUnit {
    RenderedUnit {
        package: package.to_string(),
        unit_name: unit_name.to_string(),
        file_name: format!("{}.rs", unit_name.to_case(Case::Snake)),
        text: tokens.to_string(),
    }
}

fn ident(name: &str) -> Result<syn::Ident, RenderError> {
    syn::parse_str(name).map_err(|source| RenderError::InvalidIdent {
        name: name.to_string(),
        source,
    })
}

fn type_ref(field: &str, ty: &str) -> Result<syn::Type, RenderError> {
    syn::parse_str(ty).map_err(|source| RenderError::InvalidType {
        field: field.to_string(),
        ty: ty.to_string(),
        source,
    })
}
