use crate::test_utils::*;
use crate::unit::{Resolved, Visibility};

#[test]
fn end_to_end_reexport_fixture() {
    // D aliases the builtin and exports it; A imports the export through
    // an absolute path and re-exports it renamed; the root re-exports
    // that again. Every name on the way denotes the one builtin symbol.
    let resolved = resolve_ok(vec![
        ns(
            "C",
            vec![ns("D", vec![alias_as("::core::s32", "X"), export("X")])],
        ),
        ns(
            "A",
            vec![
                imports(vec![("::C::D::X", None)]),
                exports(vec![("A::X", Some("Y"))]),
            ],
        ),
        export_as("A::Y", "X"),
    ]);

    let builtin = lookup_ok(&resolved, "::core::s32", Visibility::Exported);
    let via_d = lookup_ok(&resolved, "::C::D::X", Visibility::Exported);
    let via_a = lookup_ok(&resolved, "::A::Y", Visibility::Exported);
    let via_root = lookup_ok(&resolved, "::X", Visibility::Exported);

    assert_eq!(via_d, builtin);
    assert_eq!(via_a, builtin);
    assert_eq!(via_root, builtin);

    // A's private import is not part of its export surface.
    assert!(lookup(&resolved, "::A::X", Visibility::Exported).is_none());

    insta::assert_snapshot!(resolved.printer().dump(), @r"
    ns ::
      export X -> s32
      ns C
        ns D
          local X -> s32
          export X -> s32
      ns A
        local X -> s32
        export Y -> s32
    ");
}

#[test]
fn failed_unit_yields_no_table() {
    let unit = build_unit(vec![ns("A", vec![alias("::missing")])]);

    let err = unit.resolve().expect_err("unresolved path must fail");
    assert!(err.diagnostics().has_errors());
    assert_eq!(format!("{err}"), "name resolution failed with 1 errors");
}

#[test]
fn visibility_filters_the_frozen_table() {
    let resolved = resolve_ok(vec![
        ns(
            "A",
            vec![alias_as("::core::s32", "Secret"), export_decl(func("F"))],
        ),
    ]);

    assert!(lookup(&resolved, "::A::F", Visibility::Exported).is_some());
    assert!(lookup(&resolved, "::A::Secret", Visibility::Exported).is_none());
    assert!(lookup(&resolved, "::A::Secret", Visibility::Unit).is_some());
}

#[test]
fn diagnostics_accumulate_across_stages() {
    // A build-stage duplicate and a resolve-stage failure in one report.
    let unit = build_unit(vec![func("F"), func("F"), alias("::missing")]);

    assert!(!unit.is_valid());
    let err = unit.resolve().expect_err("unit must fail");
    assert_eq!(err.diagnostics().error_count(), 2);
}

#[test]
fn valid_unit_reports_clean() {
    let unit = build_unit(vec![ns("A", vec![export_decl(func("F"))])]);

    assert!(unit.is_valid());
    assert!(unit.diagnostics().is_empty());
    assert!(unit.resolve().is_ok());
}

#[test]
fn dump_serializes() {
    let resolved = resolve_ok(vec![ns("A", vec![export_decl(func("F"))])]);

    let json = serde_json::to_value(resolved.dump()).expect("dump serializes");

    assert_eq!(json["name"], "::");
    // Builtins are part of the table; `core` seeds first.
    assert_eq!(json["children"][0]["name"], "core");
    assert_eq!(json["children"][1]["name"], "A");
    assert_eq!(json["children"][1]["exports"][0]["name"], "F");
    assert_eq!(json["children"][1]["exports"][0]["kind"], "Function");
    assert_eq!(json["children"][1]["exports"][0]["target"], "fn F");
}

#[test]
fn export_names_in_declaration_order() {
    let resolved = resolve_ok(vec![
        ns(
            "A",
            vec![
                export_decl(func("Zeta")),
                export_decl(func("Alpha")),
                export_decl(func("Mid")),
            ],
        ),
    ]);

    let ns_sym = lookup_ok(&resolved, "::A", Visibility::Exported);
    let ns_id = resolved.symbol(ns_sym).data.as_namespace().expect("a namespace");
    let names: Vec<&str> = resolved.export_names(ns_id).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn resolved_tables_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resolved>();
}

#[test]
fn resolve_path_value_api_matches_string_api() {
    let resolved = resolve_ok(vec![ns("A", vec![export_decl(func("F"))])]);

    let mut names = resolved.names().clone();
    let a = names.intern("A");
    let f = names.intern("F");
    let path = veld_core::Path::absolute(vec![a, f]);

    assert_eq!(
        resolved.resolve_path(&path, Visibility::Exported),
        lookup(&resolved, "::A::F", Visibility::Exported),
    );
}
