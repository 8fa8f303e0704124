use super::*;

#[test]
fn rename_action_ignores_blank_and_same_name() {
    assert_eq!(rename_action("age", "  "), None);
    assert_eq!(rename_action("age", "age"), None);
    assert_eq!(
        rename_action("age", " age_years "),
        Some(SchemaAction::RenameColumn { column: "age".to_owned(), new_name: "age_years".to_owned() })
    );
}

#[test]
fn reparse_options_blank_fields_are_unset() {
    assert_eq!(reparse_options("", ""), ReparseOptions::default());
}

#[test]
fn reparse_options_parses_tab_and_header_row() {
    let options = reparse_options("\\t", " 2 ");
    assert_eq!(options.delimiter.as_deref(), Some("\t"));
    assert_eq!(options.header_row, Some(2));
    assert_eq!(reparse_options(";", "x").header_row, None);
}
