//! # dto-gen
//!
//! Build-time generation of write/read DTOs and conversion functions
//! from annotated entity declarations.
//!
//! ## Quick Start
//!
//! Annotate entities in a declaration file:
//!
//! ```rust,ignore
//! #[dto(exclude(internal_code))]
//! pub struct Product {
//!     #[generated]
//!     pub id: i64,
//!     pub name: String,
//!     pub price: f64,
//!     pub in_stock: bool,
//!     pub internal_code: Option<String>,
//! }
//! ```
//!
//! Run the generator from a build script:
//!
//! ```rust,ignore
//! use dto_gen::{FsSourceWriter, Generator};
//!
//! let mut writer = FsSourceWriter::from_env();
//! let report = Generator::new()
//!     .source("src/entities.rs")
//!     .run(&mut writer);
//!
//! for diag in &report.diagnostics {
//!     println!("cargo:warning={diag}");
//! }
//! ```
//!
//! Generates: `ProductWriteDto` (caller-supplied fields),
//! `ProductReadDto` (all non-excluded fields), and a
//! `ProductExtensions` unit with the `to_read_dto` / `to_entity`
//! conversions, written as ordinary source files under `OUT_DIR`.
//!
//! Generation is deterministic: an unchanged entity set yields
//! byte-identical output on every round.

pub mod classify;
pub mod diagnostics;
pub mod discover;
pub mod driver;
pub mod model;
pub mod render;
pub mod synth;
pub mod write;

pub use diagnostics::{Diagnostic, Report, Severity};
pub use driver::Generator;
pub use model::{Directive, Entity, Field};
pub use write::{FsSourceWriter, MemoryWriter, SourceWriter};
