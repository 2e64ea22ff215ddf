//! Emission driver: orchestrates one build round.
//!
//! Runs discovery → classification → synthesis → rendering → writing
//! per entity, with per-entity fault isolation: one entity's fault is
//! recorded and its remaining outputs abandoned, but the round always
//! continues to the next entity.

use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};
use tracing::{debug, info, warn};

use crate::{
    classify::classify,
    diagnostics::{Diagnostic, Report},
    discover::discover,
    model::{Directive, Entity},
    render::{RenderedUnit, Renderer, RustRenderer},
    synth::{
        DtoKind, GeneratedConversion, synthesize_to_entity, synthesize_to_read_dto,
        synthesize_type,
    },
    write::{SourceWriter, WriteOutcome},
};

/// One source of entity declarations.
#[derive(Debug)]
enum Source {
    /// Declaration file on disk; the package name is the file stem.
    File(PathBuf),

    /// In-memory declaration text under an explicit package name.
    Text { package: String, text: String },
}

/// Build-round orchestrator.
///
/// Collect declaration sources with [`source`](Self::source) /
/// [`source_text`](Self::source_text), then [`run`](Self::run) one
/// round against a [`SourceWriter`]. Entities are
/// generation-independent units; every round regenerates all outputs
/// from scratch.
pub struct Generator {
    sources: Vec<Source>,
    renderer: Box<dyn Renderer>,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            renderer: Box::new(RustRenderer),
        }
    }

    /// Add a declaration file. Its stem becomes the package name of
    /// every entity it declares.
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    /// Add declaration text under an explicit package name.
    pub fn source_text(mut self, package: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.push(Source::Text {
            package: package.into(),
            text: text.into(),
        });
        self
    }

    /// Replace the built-in Rust renderer.
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Run one build round against the given writer.
    ///
    /// Faults are local to the entity or unit that triggered them;
    /// whether an error-level diagnostic fails the enclosing build is
    /// the caller's decision.
    pub fn run(&self, writer: &mut dyn SourceWriter) -> Report {
        let mut report = Report::default();

        for source in &self.sources {
            match source {
                Source::File(path) => match std::fs::read_to_string(path) {
                    Ok(text) => {
                        let package = package_for(path);
                        self.run_source(&package, &text, writer, &mut report);
                    }
                    Err(err) => report.push(Diagnostic::error(format!(
                        "cannot read `{}`: {err}",
                        path.display()
                    ))),
                },
                Source::Text { package, text } => {
                    self.run_source(package, text, writer, &mut report);
                }
            }
        }

        report
    }

    fn run_source(
        &self,
        package: &str,
        text: &str,
        writer: &mut dyn SourceWriter,
        report: &mut Report,
    ) {
        let discovery = match discover(package, text) {
            Ok(discovery) => discovery,
            Err(err) => {
                report.push(Diagnostic::error(format!(
                    "cannot parse package `{package}`: {err}"
                )));
                return;
            }
        };

        for fault in discovery.faults {
            report.push(Diagnostic::error(fault.message).for_target(fault.target));
        }

        for (entity, directive) in discovery.entities {
            self.emit_entity(&entity, &directive, writer, report);
        }
    }

    /// Pipeline for one entity: classify → synthesize → render →
    /// write.
    fn emit_entity(
        &self,
        entity: &Entity,
        directive: &Directive,
        writer: &mut dyn SourceWriter,
        report: &mut Report,
    ) {
        debug!(entity = %entity.name, package = %entity.package, "generating");

        let classified = classify(entity, directive);
        let mut rendered: Vec<RenderedUnit> = Vec::new();

        if directive.write {
            let ty = synthesize_type(entity, &classified.write_fields, DtoKind::Write);
            match self.renderer.render_type(&entity.package, &ty) {
                Ok(unit) => rendered.push(unit),
                Err(err) => {
                    report.push(
                        Diagnostic::error(err.to_string())
                            .for_target(entity.name.as_str())
                            .for_unit(ty.name),
                    );
                    return;
                }
            }
        }

        if directive.read {
            let ty = synthesize_type(entity, &classified.read_fields, DtoKind::Read);
            match self.renderer.render_type(&entity.package, &ty) {
                Ok(unit) => rendered.push(unit),
                Err(err) => {
                    report.push(
                        Diagnostic::error(err.to_string())
                            .for_target(entity.name.as_str())
                            .for_unit(ty.name),
                    );
                    return;
                }
            }
        }

        let mut conversions: Vec<GeneratedConversion> = Vec::new();

        if directive.read {
            conversions.push(synthesize_to_read_dto(entity, &classified.read_fields));
        }

        if directive.write {
            match synthesize_to_entity(entity, directive) {
                Ok(conv) => conversions.push(conv),
                // Suppresses only `to_entity`; the entity's other units
                // still go out.
                Err(fault) => report.push(
                    Diagnostic::error(fault.to_string())
                        .for_target(entity.name.as_str())
                        .for_unit(format!("{}Extensions", entity.name)),
                ),
            }
        }

        if !conversions.is_empty() {
            match self
                .renderer
                .render_extensions(&entity.package, &entity.name, &conversions)
            {
                Ok(unit) => rendered.push(unit),
                Err(err) => {
                    report.push(
                        Diagnostic::error(err.to_string())
                            .for_target(entity.name.as_str())
                            .for_unit(format!("{}Extensions", entity.name)),
                    );
                    return;
                }
            }
        }

        for unit in &rendered {
            match writer.write(unit) {
                Ok(WriteOutcome::Written) => {
                    info!(unit = %unit.unit_name, package = %unit.package, "generated");
                    report.written.push(format!("{}::{}", unit.package, unit.unit_name));
                    report.push(Diagnostic::note(format!(
                        "generated {}::{}",
                        unit.package, unit.unit_name
                    )));
                }
                Ok(WriteOutcome::Unavailable) => {
                    warn!(entity = %entity.name, "generated-source root not configured");
                    report.push(
                        Diagnostic::warning(
                            "generated-source root not configured, output skipped",
                        )
                        .for_target(entity.name.as_str()),
                    );
                    return;
                }
                Err(err) => {
                    report.push(
                        Diagnostic::error(format!("{err}: {}", err.source))
                            .for_target(entity.name.as_str())
                            .for_unit(unit.unit_name.as_str()),
                    );
                    return;
                }
            }
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Package name for a declaration file: its snake-cased stem.
fn package_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_case(Case::Snake))
        .unwrap_or_else(|| "generated".to_string())
}
