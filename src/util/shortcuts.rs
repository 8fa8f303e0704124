//! Keyboard chord normalization and shortcut lookup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages declare shortcuts as chord strings (`"mod+s"`, `"mod+shift+z"`,
//! `"escape"`). Key events are reduced to the same canonical chord so one
//! table serves both Control- and Command-based platforms. The browser
//! listener lives in `util::keyboard`; everything here is plain data so the
//! dispatch rules are testable without a DOM.

#[cfg(test)]
#[path = "shortcuts_test.rs"]
mod shortcuts_test;

/// The one chord that fires even while the user is typing.
pub const ESCAPE: &str = "escape";

/// Key and modifier state of a single key-down event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyStroke {
    /// Key name as reported by the browser (`"s"`, `"Escape"`, `" "`).
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyStroke {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Canonical chord: `mod`, `shift`, `alt` (in that order) then the key.
    #[must_use]
    pub fn chord(&self) -> String {
        let key = normalize_key(&self.key);
        let mut parts: Vec<&str> = Vec::with_capacity(4);
        if self.ctrl || self.meta {
            parts.push("mod");
        }
        if self.shift {
            parts.push("shift");
        }
        if self.alt {
            parts.push("alt");
        }
        parts.push(&key);
        parts.join("+")
    }
}

fn normalize_key(key: &str) -> String {
    if key == " " {
        return "space".to_owned();
    }
    key.to_lowercase()
}

/// Where a key event originated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetKind {
    /// A text field or other element that consumes typed characters.
    Editable,
    #[default]
    Other,
}

/// Classify an event target from its tag name, ARIA role, and
/// content-editable flag.
pub fn is_editable_target(tag_name: &str, role: Option<&str>, content_editable: bool) -> bool {
    if content_editable {
        return true;
    }
    if matches!(tag_name.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT") {
        return true;
    }
    role.is_some_and(|r| r.eq_ignore_ascii_case("textbox") || r.eq_ignore_ascii_case("combobox"))
}

/// Normalize a declared chord such as `"Ctrl+Shift+Z"` or `"cmd+s"`.
///
/// Modifier tokens may appear in any order and any case; `ctrl`, `control`,
/// `cmd`, `command`, `meta` and `mod` all collapse to `mod`.
pub fn normalize_chord(declared: &str) -> String {
    let mut stroke = KeyStroke::default();
    let tokens: Vec<&str> = declared.split('+').collect();
    let (key, modifiers) = match tokens.split_last() {
        // `"mod++"` declares the plus key itself.
        Some((last, rest)) if last.is_empty() && rest.last().is_some_and(|t| t.is_empty()) => {
            ("+", &rest[..rest.len() - 1])
        }
        Some((last, rest)) => (*last, rest),
        None => (declared, &[][..]),
    };
    for token in modifiers {
        match token.trim().to_ascii_lowercase().as_str() {
            "mod" | "ctrl" | "control" | "cmd" | "command" | "meta" => stroke.ctrl = true,
            "shift" => stroke.shift = true,
            "alt" | "option" => stroke.alt = true,
            _ => {}
        }
    }
    stroke.key = match key.trim() {
        "space" | "Space" => " ".to_owned(),
        "esc" | "Esc" => "escape".to_owned(),
        other => other.to_owned(),
    };
    stroke.chord()
}

/// Ordered chord → action table.
///
/// Rebuilt by callers whenever their declarations change; later entries for
/// the same chord replace earlier ones.
#[derive(Clone, Debug)]
pub struct ShortcutMap<A> {
    entries: Vec<(String, A)>,
}

impl<A> Default for ShortcutMap<A> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<A> ShortcutMap<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under the normalized form of `chord`.
    #[must_use]
    pub fn with(mut self, chord: &str, action: A) -> Self {
        self.insert(chord, action);
        self
    }

    pub fn insert(&mut self, chord: &str, action: A) {
        let chord = normalize_chord(chord);
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == chord) {
            entry.1 = action;
        } else {
            self.entries.push((chord, action));
        }
    }

    #[must_use]
    pub fn get(&self, chord: &str) -> Option<&A> {
        self.entries.iter().find(|(c, _)| c == chord).map(|(_, a)| a)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered chords in declaration order.
    pub fn chords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Decide which action, if any, a key event should fire.
    ///
    /// Events already default-prevented by another handler are ignored.
    /// While focus is in an editable target only [`ESCAPE`] is delivered.
    pub fn resolve(&self, stroke: &KeyStroke, target: TargetKind, default_prevented: bool) -> Option<&A> {
        if default_prevented {
            return None;
        }
        let chord = stroke.chord();
        let action = self.get(&chord)?;
        if target == TargetKind::Editable && chord != ESCAPE {
            return None;
        }
        Some(action)
    }
}

/// One row in the help overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortcutHelp {
    pub action: &'static str,
    pub keys: &'static str,
}

/// Every shortcut the client binds, for the help overlay.
pub const SHORTCUT_HELP: &[ShortcutHelp] = &[
    ShortcutHelp { action: "Save changes", keys: "Cmd/Ctrl + S" },
    ShortcutHelp { action: "Open datasets", keys: "Cmd/Ctrl + O" },
    ShortcutHelp { action: "Run analysis", keys: "Cmd/Ctrl + Enter" },
    ShortcutHelp { action: "Undo", keys: "Cmd/Ctrl + Z" },
    ShortcutHelp { action: "Redo", keys: "Shift + Cmd/Ctrl + Z / Cmd/Ctrl + Y" },
    ShortcutHelp { action: "Close dialog", keys: "Esc" },
    ShortcutHelp { action: "Show shortcuts", keys: "Shift + ?" },
];

/// Chords bound by the client, matching [`SHORTCUT_HELP`].
pub mod chords {
    pub const SAVE: &str = "mod+s";
    pub const OPEN: &str = "mod+o";
    pub const EXECUTE: &str = "mod+enter";
    pub const UNDO: &str = "mod+z";
    pub const REDO: &str = "mod+shift+z";
    pub const REDO_ALT: &str = "mod+y";
    pub const ESCAPE: &str = super::ESCAPE;
    pub const HELP: &str = "shift+?";
}
