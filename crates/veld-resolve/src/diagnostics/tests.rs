use veld_core::Span;

use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedPath, Span::new(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.render(), @"error: unresolved path");
}

#[test]
fn report_with_detail() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateBinding, Span::new(0, 5))
        .message("X")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @"error: `X` is already bound in this namespace");
}

#[test]
fn related_and_hint_render_in_plain_mode() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateExport, Span::new(10, 15))
        .message("Y")
        .related_to("first exported here", Span::new(0, 5))
        .hint("rename one of the exports")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: `Y` is already exported from this namespace
      note: first exported here
      help: rename one of the exports
    ");
}

#[test]
fn default_hints_attach_automatically() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::TypeMismatch, Span::new(0, 3))
        .message("main")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: `main` is not a type
      help: functions, globals, and namespaces cannot be used as types
    ");
}

#[test]
fn error_count_ignores_warnings() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedPath, Span::new(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::CyclicExport, Span::new(2, 3))
        .emit();

    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn extend_merges_collections() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::UnresolvedPath, Span::new(0, 1))
        .emit();

    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::DuplicateBinding, Span::new(2, 3))
        .emit();

    a.extend(b);
    assert_eq!(a.len(), 2);
}

#[test]
fn source_rendering_annotates_the_span() {
    let source = "alias missing::thing;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedPath, Span::new(6, 20))
        .message("missing::thing")
        .emit();

    let rendered = diagnostics.render_source(source);
    assert!(rendered.contains("cannot resolve `missing::thing`"));
    assert!(rendered.contains("^^^^^^^^^^^^^^"));
    assert!(rendered.contains(source));
}

#[test]
fn source_rendering_lands_on_the_right_line() {
    let source = indoc::indoc! {r#"
        ns A {
            alias missing;
        }
    "#};
    let offset = source.find("missing").unwrap() as u32;

    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedPath, Span::new(offset, offset + 7))
        .message("missing")
        .emit();

    let rendered = diagnostics.render_source(source);
    assert!(rendered.contains("2 |"));
    assert!(rendered.contains("^^^^^^^"));
}

#[test]
fn source_rendering_clamps_out_of_range_spans() {
    let source = "x";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedPath, Span::new(40, 60))
        .emit();

    // Must not panic; the span is clamped into the source.
    let rendered = diagnostics.render_source(source);
    assert!(rendered.contains("unresolved path"));
}

#[test]
fn empty_collection_renders_empty() {
    let diagnostics = Diagnostics::new();
    assert_eq!(diagnostics.render(), "");
    assert_eq!(diagnostics.render_source("src"), "");
    assert!(diagnostics.is_empty());
}
