//! End-to-end rounds: annotated source text in, rendered units out.
//!
//! Units are asserted structurally by re-parsing the rendered text
//! with syn, not by raw string comparison.

use dto_gen::{Generator, MemoryWriter, Report, Severity};

const USER: &str = r#"
#[dto]
pub struct User {
    #[generated]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}
"#;

const PRODUCT: &str = r#"
#[dto(exclude(internal_code))]
pub struct Product {
    #[generated]
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
    pub internal_code: String,
}
"#;

fn run(text: &str) -> (Report, MemoryWriter) {
    let mut writer = MemoryWriter::new();
    let report = Generator::new()
        .source_text("entities", text)
        .run(&mut writer);
    (report, writer)
}

fn struct_fields(text: &str, name: &str) -> Vec<String> {
    let file = syn::parse_file(text).expect("generated unit must parse");
    for item in file.items {
        if let syn::Item::Struct(item) = item
            && item.ident == name
        {
            return item
                .fields
                .iter()
                .map(|f| f.ident.as_ref().expect("named field").to_string())
                .collect();
        }
    }
    panic!("struct `{name}` not found in unit");
}

/// All `(receiver type, function name)` pairs in a rendered unit.
fn impl_fns(text: &str) -> Vec<(String, String)> {
    let file = syn::parse_file(text).expect("generated unit must parse");
    let mut fns = Vec::new();
    for item in file.items {
        if let syn::Item::Impl(imp) = item {
            let syn::Type::Path(self_ty) = imp.self_ty.as_ref() else {
                panic!("impl on a non-path type");
            };
            let receiver = self_ty.path.segments.last().expect("type name").ident.to_string();
            for impl_item in imp.items {
                if let syn::ImplItem::Fn(f) = impl_item {
                    fns.push((receiver.clone(), f.sig.ident.to_string()));
                }
            }
        }
    }
    fns
}

/// Named parameters of one function in a rendered unit, skipping the
/// receiver.
fn fn_params(text: &str, fn_name: &str) -> Vec<String> {
    let file = syn::parse_file(text).expect("generated unit must parse");
    for item in file.items {
        if let syn::Item::Impl(imp) = item {
            for impl_item in imp.items {
                if let syn::ImplItem::Fn(f) = impl_item
                    && f.sig.ident == fn_name
                {
                    return f
                        .sig
                        .inputs
                        .iter()
                        .filter_map(|arg| match arg {
                            syn::FnArg::Typed(pat) => match pat.pat.as_ref() {
                                syn::Pat::Ident(id) => Some(id.ident.to_string()),
                                _ => None,
                            },
                            syn::FnArg::Receiver(_) => None,
                        })
                        .collect();
                }
            }
        }
    }
    panic!("fn `{fn_name}` not found in unit");
}

#[test]
fn user_defaults_produce_three_units() {
    let (report, writer) = run(USER);

    assert!(!report.has_errors());
    let names: Vec<&str> = writer.units.iter().map(|u| u.unit_name.as_str()).collect();
    assert_eq!(names, ["UserWriteDto", "UserReadDto", "UserExtensions"]);
    assert_eq!(
        report.written,
        [
            "entities::UserWriteDto",
            "entities::UserReadDto",
            "entities::UserExtensions",
        ]
    );
}

#[test]
fn write_dto_carries_caller_supplied_fields_in_order() {
    let (_, writer) = run(USER);

    let unit = writer.unit("UserWriteDto").expect("write dto unit");
    assert_eq!(unit.file_name, "user_write_dto.rs");
    assert_eq!(
        struct_fields(&unit.text, "UserWriteDto"),
        ["name", "email", "age"]
    );
}

#[test]
fn read_dto_carries_generated_fields_too() {
    let (_, writer) = run(USER);

    let unit = writer.unit("UserReadDto").expect("read dto unit");
    assert_eq!(
        struct_fields(&unit.text, "UserReadDto"),
        ["id", "name", "email", "age"]
    );
}

#[test]
fn extensions_unit_holds_both_conversions() {
    let (_, writer) = run(USER);

    let unit = writer.unit("UserExtensions").expect("extensions unit");
    assert_eq!(unit.file_name, "user_extensions.rs");
    assert_eq!(
        impl_fns(&unit.text),
        [
            ("User".to_string(), "to_read_dto".to_string()),
            ("UserWriteDto".to_string(), "to_entity".to_string()),
        ]
    );
    assert_eq!(fn_params(&unit.text, "to_entity"), ["id"]);
}

#[test]
fn excluded_field_is_absent_from_both_dtos() {
    let (_, writer) = run(PRODUCT);

    let write = writer.unit("ProductWriteDto").expect("write dto unit");
    let read = writer.unit("ProductReadDto").expect("read dto unit");

    assert_eq!(
        struct_fields(&write.text, "ProductWriteDto"),
        ["name", "price", "in_stock"]
    );
    assert_eq!(
        struct_fields(&read.text, "ProductReadDto"),
        ["id", "name", "price", "in_stock"]
    );
}

#[test]
fn excluded_required_field_suppresses_to_entity_only() {
    let (report, writer) = run(PRODUCT);

    // one construction-mapping fault, reported against the entity
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("internal_code"));
    assert_eq!(errors[0].target.as_deref(), Some("Product"));

    // both DTOs and the read conversion still go out
    let unit = writer.unit("ProductExtensions").expect("extensions unit");
    assert_eq!(
        impl_fns(&unit.text),
        [("Product".to_string(), "to_read_dto".to_string())]
    );
}

#[test]
fn excluded_optional_field_is_defaulted_in_to_entity() {
    let source = r#"
#[dto(exclude(internal_code))]
pub struct Product {
    #[generated]
    pub id: i64,
    pub name: String,
    pub internal_code: Option<String>,
}
"#;
    let (report, writer) = run(source);

    assert!(!report.has_errors());
    let unit = writer.unit("ProductExtensions").expect("extensions unit");
    assert_eq!(fn_params(&unit.text, "to_entity"), ["id"]);
    assert!(unit.text.contains("Default :: default ()"));
}

#[test]
fn disabled_write_flag_suppresses_write_dto_and_to_entity() {
    let source = r#"
#[dto(write = false)]
pub struct Report {
    #[generated]
    pub id: i64,
    pub body: String,
}
"#;
    let (report, writer) = run(source);

    assert!(!report.has_errors());
    let names: Vec<&str> = writer.units.iter().map(|u| u.unit_name.as_str()).collect();
    assert_eq!(names, ["ReportReadDto", "ReportExtensions"]);

    let unit = writer.unit("ReportExtensions").expect("extensions unit");
    assert_eq!(
        impl_fns(&unit.text),
        [("Report".to_string(), "to_read_dto".to_string())]
    );
}

#[test]
fn disabled_read_flag_suppresses_read_dto_and_to_read_dto() {
    let source = r#"
#[dto(read = false)]
pub struct Command {
    #[generated]
    pub id: i64,
    pub action: String,
}
"#;
    let (report, writer) = run(source);

    assert!(!report.has_errors());
    let names: Vec<&str> = writer.units.iter().map(|u| u.unit_name.as_str()).collect();
    assert_eq!(names, ["CommandWriteDto", "CommandExtensions"]);

    let unit = writer.unit("CommandExtensions").expect("extensions unit");
    assert_eq!(
        impl_fns(&unit.text),
        [("CommandWriteDto".to_string(), "to_entity".to_string())]
    );
}

#[test]
fn both_flags_disabled_produce_nothing() {
    let source = r#"
#[dto(write = false, read = false)]
pub struct Ghost {
    pub name: String,
}
"#;
    let (report, writer) = run(source);

    assert!(!report.has_errors());
    assert!(writer.units.is_empty());
}

#[test]
fn directive_on_non_struct_is_a_usage_fault() {
    let source = r#"
#[dto]
pub enum Shape {
    Circle,
    Square,
}

#[dto]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
"#;
    let (report, writer) = run(source);

    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].target.as_deref(), Some("Shape"));

    // the faulty declaration produces no units, its sibling still does
    let names: Vec<&str> = writer.units.iter().map(|u| u.unit_name.as_str()).collect();
    assert_eq!(names, ["PointWriteDto", "PointReadDto", "PointExtensions"]);
}

#[test]
fn directive_on_tuple_struct_is_a_usage_fault() {
    let source = r#"
#[dto]
pub struct Pair(i64, i64);
"#;
    let (report, writer) = run(source);

    assert_eq!(report.errors().count(), 1);
    assert!(writer.units.is_empty());
}

#[test]
fn unknown_exclude_name_is_accepted_silently() {
    let source = r#"
#[dto(exclude(no_such_field))]
pub struct User {
    #[generated]
    pub id: i64,
    pub name: String,
}
"#;
    let (report, writer) = run(source);

    assert!(!report.has_errors());
    let unit = writer.unit("UserReadDto").expect("read dto unit");
    assert_eq!(struct_fields(&unit.text, "UserReadDto"), ["id", "name"]);
}

#[test]
fn all_generated_fields_still_yield_an_empty_write_dto() {
    let source = r#"
#[dto]
pub struct Stamp {
    #[generated]
    pub id: i64,
    #[generated]
    pub issued_at: u64,
}
"#;
    let (report, writer) = run(source);

    assert!(!report.has_errors());
    let unit = writer.unit("StampWriteDto").expect("write dto unit");
    assert!(struct_fields(&unit.text, "StampWriteDto").is_empty());

    // every value of the reconstructed entity comes from a parameter
    let ext = writer.unit("StampExtensions").expect("extensions unit");
    assert_eq!(fn_params(&ext.text, "to_entity"), ["id", "issued_at"]);
}

#[test]
fn generation_is_idempotent() {
    let (_, first) = run(USER);
    let (_, second) = run(USER);

    let first_texts: Vec<&str> = first.units.iter().map(|u| u.text.as_str()).collect();
    let second_texts: Vec<&str> = second.units.iter().map(|u| u.text.as_str()).collect();

    assert_eq!(first_texts, second_texts);
}

#[test]
fn unavailable_output_root_downgrades_to_warnings() {
    let mut writer = dto_gen::FsSourceWriter::unconfigured();
    let report = Generator::new()
        .source_text("entities", USER)
        .source_text("catalog", PRODUCT)
        .run(&mut writer);

    // one warning per affected entity, round completes
    assert_eq!(report.warnings().count(), 2);
    assert!(report.written.is_empty());
    assert!(
        report
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .all(|d| d.target.is_some())
    );
}

#[test]
fn entities_generate_independently_across_packages() {
    let mut writer = MemoryWriter::new();
    let report = Generator::new()
        .source_text("entities", USER)
        .source_text("catalog", PRODUCT)
        .run(&mut writer);

    // Product's construction fault does not affect User
    assert_eq!(report.errors().count(), 1);
    assert!(writer.unit("UserExtensions").is_some());
    assert_eq!(
        writer.unit("ProductWriteDto").map(|u| u.package.as_str()),
        Some("catalog")
    );
}
