use crate::test_utils::*;

#[test]
fn dump_hides_builtins_by_default() {
    let resolved = resolve_ok(vec![
        ns("A", vec![export_decl(type_alias("Int", t("::core::s32")))]),
    ]);

    insta::assert_snapshot!(resolved.printer().dump(), @r"
    ns ::
      ns A
        local Int -> s32
        export Int -> s32
    ");
}

#[test]
fn dump_with_builtins_includes_core() {
    let resolved = resolve_ok(vec![]);

    let dump = resolved.printer().with_builtins(true).dump();
    assert!(dump.contains("ns core"));
    assert!(dump.contains("export s32 -> s32"));
    assert!(dump.contains("export f64 -> f64"));
}

#[test]
fn dump_describes_every_symbol_kind() {
    let resolved = resolve_ok(vec![
        ns(
            "M",
            vec![
                export_decl(func("F")),
                export_decl(struct_decl("S", vec![("x", t("::core::s32"))])),
                export_decl(global("G", t("::core::u8"), None)),
                export_ns("Inner", vec![]),
            ],
        ),
    ]);

    insta::assert_snapshot!(resolved.printer().dump(), @r"
    ns ::
      ns M
        local F -> fn F
        local S -> struct S
        local G -> global G
        export F -> fn F
        export S -> struct S
        export G -> global G
        export Inner -> ns ::M::Inner
        ns Inner
    ");
}

#[test]
fn empty_unit_dumps_the_bare_root() {
    let resolved = resolve_ok(vec![]);

    insta::assert_snapshot!(resolved.printer().dump(), @"ns ::");
}
