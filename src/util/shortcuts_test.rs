use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Save,
    Close,
    Undo,
    Redo,
}

fn map() -> ShortcutMap<Action> {
    ShortcutMap::new()
        .with(chords::SAVE, Action::Save)
        .with(chords::ESCAPE, Action::Close)
        .with(chords::UNDO, Action::Undo)
        .with(chords::REDO, Action::Redo)
}

// =============================================================
// Chord normalization
// =============================================================

#[test]
fn control_and_command_both_normalize_to_mod() {
    assert_eq!(KeyStroke::new("s").ctrl().chord(), "mod+s");
    assert_eq!(KeyStroke::new("s").meta().chord(), "mod+s");
    assert_eq!(KeyStroke::new("s").ctrl().meta().chord(), "mod+s");
}

#[test]
fn modifiers_are_emitted_in_fixed_order() {
    let stroke = KeyStroke::new("Z").alt().shift().ctrl();
    assert_eq!(stroke.chord(), "mod+shift+alt+z");
    assert_eq!(KeyStroke::new("Z").shift().meta().chord(), "mod+shift+z");
}

#[test]
fn key_name_is_lowercased() {
    assert_eq!(KeyStroke::new("Escape").chord(), "escape");
    assert_eq!(KeyStroke::new("Enter").ctrl().chord(), "mod+enter");
}

#[test]
fn space_key_becomes_space_token() {
    assert_eq!(KeyStroke::new(" ").chord(), "space");
    assert_eq!(KeyStroke::new(" ").shift().chord(), "shift+space");
}

#[test]
fn declared_chords_normalize_like_events() {
    assert_eq!(normalize_chord("Ctrl+S"), "mod+s");
    assert_eq!(normalize_chord("cmd+s"), "mod+s");
    assert_eq!(normalize_chord("Shift+Mod+Z"), "mod+shift+z");
    assert_eq!(normalize_chord("Esc"), "escape");
    assert_eq!(normalize_chord("space"), "space");
    assert_eq!(normalize_chord("shift+?"), "shift+?");
    assert_eq!(normalize_chord("mod++"), "mod++");
}

#[test]
fn declared_chord_normalization_is_idempotent() {
    for chord in ["mod+s", "mod+shift+z", "escape", "mod+enter", "shift+?", "alt+space"] {
        let once = normalize_chord(chord);
        assert_eq!(normalize_chord(&once), once);
    }
}

// =============================================================
// Editable targets
// =============================================================

#[test]
fn text_fields_are_editable() {
    assert!(is_editable_target("INPUT", None, false));
    assert!(is_editable_target("textarea", None, false));
    assert!(is_editable_target("SELECT", None, false));
}

#[test]
fn content_editable_and_aria_roles_are_editable() {
    assert!(is_editable_target("DIV", None, true));
    assert!(is_editable_target("DIV", Some("textbox"), false));
    assert!(is_editable_target("SPAN", Some("combobox"), false));
}

#[test]
fn plain_elements_are_not_editable() {
    assert!(!is_editable_target("BUTTON", None, false));
    assert!(!is_editable_target("DIV", Some("button"), false));
    assert!(!is_editable_target("BODY", None, false));
}

// =============================================================
// ShortcutMap::resolve
// =============================================================

#[test]
fn resolve_finds_mapped_chord() {
    let shortcuts = map();
    let fired = shortcuts.resolve(&KeyStroke::new("s").meta(), TargetKind::Other, false);
    assert_eq!(fired, Some(&Action::Save));
}

#[test]
fn resolve_passes_through_unmapped_chord() {
    let shortcuts = map();
    assert_eq!(shortcuts.resolve(&KeyStroke::new("k").ctrl(), TargetKind::Other, false), None);
    assert_eq!(shortcuts.resolve(&KeyStroke::new("s"), TargetKind::Other, false), None);
}

#[test]
fn resolve_ignores_default_prevented_events() {
    let shortcuts = map();
    assert_eq!(shortcuts.resolve(&KeyStroke::new("s").ctrl(), TargetKind::Other, true), None);
    assert_eq!(shortcuts.resolve(&KeyStroke::new("Escape"), TargetKind::Other, true), None);
}

#[test]
fn escape_fires_inside_text_input() {
    let shortcuts = map();
    let fired = shortcuts.resolve(&KeyStroke::new("Escape"), TargetKind::Editable, false);
    assert_eq!(fired, Some(&Action::Close));
}

#[test]
fn other_shortcuts_are_suppressed_inside_text_input() {
    let shortcuts = map();
    assert_eq!(shortcuts.resolve(&KeyStroke::new("s").ctrl(), TargetKind::Editable, false), None);
    assert_eq!(shortcuts.resolve(&KeyStroke::new("z").meta(), TargetKind::Editable, false), None);
}

#[test]
fn redo_requires_shift() {
    let shortcuts = map();
    let undo = shortcuts.resolve(&KeyStroke::new("z").ctrl(), TargetKind::Other, false);
    let redo = shortcuts.resolve(&KeyStroke::new("Z").ctrl().shift(), TargetKind::Other, false);
    assert_eq!(undo, Some(&Action::Undo));
    assert_eq!(redo, Some(&Action::Redo));
}

#[test]
fn later_registration_replaces_earlier_for_same_chord() {
    let shortcuts = ShortcutMap::new().with("ctrl+s", Action::Save).with("cmd+s", Action::Close);
    assert_eq!(shortcuts.len(), 1);
    assert_eq!(shortcuts.get("mod+s"), Some(&Action::Close));
}

#[test]
fn chords_are_listed_in_declaration_order() {
    let shortcuts = map();
    let listed: Vec<&str> = shortcuts.chords().collect();
    assert_eq!(listed, vec!["mod+s", "escape", "mod+z", "mod+shift+z"]);
}

#[test]
fn help_table_covers_every_bound_chord_group() {
    assert_eq!(SHORTCUT_HELP.len(), 7);
    assert!(SHORTCUT_HELP.iter().any(|row| row.action == "Close dialog"));
}
