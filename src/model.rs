//! Plain-data entity model consumed by the generation engine.
//!
//! Produced by [`discover`](crate::discover) from annotated source, or
//! constructed directly by callers embedding the generator. The engine
//! works exclusively on these structures and never inspects source
//! syntax itself.

/// One annotated entity declaration.
///
/// Read-only for the duration of a build round; the engine never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Type name (e.g. `User`).
    pub name: String,

    /// Namespace the entity and its generated units live in
    /// (a module path such as `entities`).
    pub package: String,

    /// Fields in declaration order.
    ///
    /// Order is load-bearing: it fixes the field order of every
    /// generated type and the argument order of every conversion.
    pub fields: Vec<Field>,
}

impl Entity {
    pub fn new(name: impl Into<String>, package: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            fields,
        }
    }
}

/// One entity field: an opaque named-and-typed slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name, unique within its entity.
    pub name: String,

    /// Type reference exactly as written in the declaration.
    ///
    /// Passed through unchanged into generated code; no type
    /// transformation is ever applied.
    pub ty: String,

    /// Set for fields whose value the system assigns (surrogate ids,
    /// server-side timestamps). Generated fields are never part of the
    /// write DTO and are supplied to `to_entity` as extra parameters.
    pub generated: bool,
}

impl Field {
    /// A caller-supplied field.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            generated: false,
        }
    }

    /// A system-assigned field (`#[generated]`).
    pub fn generated(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            generated: true,
        }
    }

    /// Check if the declared type is `Option<T>`.
    ///
    /// Used by the conversion synthesizer: an excluded `Option` field
    /// can be defaulted when reconstructing the entity, a required one
    /// cannot.
    ///
    /// # Limitations
    ///
    /// This is a simple heuristic that checks the last path segment
    /// before the type arguments. It may give false positives for
    /// custom types named `Option`.
    pub fn is_option(&self) -> bool {
        let Some((head, _)) = self.ty.split_once('<') else {
            return false;
        };
        head.rsplit("::").next().map(str::trim) == Some("Option")
    }
}

/// Per-entity generation directive, attached 1:1 to an [`Entity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Generate the write DTO and the `to_entity` conversion.
    pub write: bool,

    /// Generate the read DTO and the `to_read_dto` conversion.
    pub read: bool,

    /// Field names excluded from both DTOs, in declaration order.
    ///
    /// Matched purely by name; an entry matching no field is accepted
    /// silently and has no effect.
    pub exclude: Vec<String>,
}

impl Default for Directive {
    fn default() -> Self {
        Self {
            write: true,
            read: true,
            exclude: Vec::new(),
        }
    }
}

impl Directive {
    /// Check if a field name is excluded.
    pub fn excludes(&self, name: &str) -> bool {
        self.exclude.iter().any(|n| n == name)
    }
}
