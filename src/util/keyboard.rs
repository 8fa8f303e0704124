//! Window-level keyboard shortcut listener.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages build a [`ShortcutMap`] of callbacks and hand it to
//! [`use_shortcuts`]. The listener is attached to `window` while `enabled`
//! is true and removed when it turns false or the owning component unmounts.
//! Dispatch rules (editable-target guard, default-prevented suppression)
//! live in `util::shortcuts`.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

use super::shortcuts::ShortcutMap;
#[cfg(feature = "hydrate")]
use super::shortcuts::{KeyStroke, TargetKind, is_editable_target};

/// Shortcut table whose actions receive the triggering event.
pub type KeyBindings = ShortcutMap<Callback<KeyboardEvent>>;

/// A listener registration that can be taken off its target.
pub trait Detach {
    fn detach(self);
}

#[cfg(feature = "hydrate")]
impl Detach for WindowListenerHandle {
    fn detach(self) {
        self.remove();
    }
}

/// Holds at most one attached listener.
///
/// Every `sync` detaches the previous registration before attaching a new
/// one, so toggling `enabled` never stacks listeners.
pub struct ListenerSlot<H: Detach> {
    current: Option<H>,
}

impl<H: Detach> Default for ListenerSlot<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H: Detach> ListenerSlot<H> {
    /// Detach the current listener, then attach a fresh one if `enabled`.
    pub fn sync(&mut self, enabled: bool, attach: impl FnOnce() -> H) {
        self.clear();
        if enabled {
            self.current = Some(attach());
        }
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            old.detach();
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }
}

/// Bind `bindings` to window key-down events while `enabled` holds.
pub fn use_shortcuts(bindings: KeyBindings, enabled: Signal<bool>) {
    #[cfg(feature = "hydrate")]
    {
        use std::rc::Rc;

        let bindings = Rc::new(bindings);
        let slot = StoredValue::new_local(ListenerSlot::<WindowListenerHandle>::default());

        Effect::new(move || {
            let active = enabled.get();
            let bindings = Rc::clone(&bindings);
            slot.update_value(move |s| {
                s.sync(active, move || {
                    window_event_listener(leptos::ev::keydown, move |ev| dispatch(&bindings, &ev))
                });
            });
        });

        on_cleanup(move || slot.update_value(ListenerSlot::clear));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (bindings, enabled);
    }
}

#[cfg(feature = "hydrate")]
fn dispatch(bindings: &KeyBindings, ev: &KeyboardEvent) {
    let stroke = stroke_from_event(ev);
    let target = target_kind(ev);
    if let Some(action) = bindings.resolve(&stroke, target, ev.default_prevented()) {
        ev.prevent_default();
        action.run(ev.clone());
    }
}

#[cfg(feature = "hydrate")]
fn stroke_from_event(ev: &KeyboardEvent) -> KeyStroke {
    KeyStroke {
        key: ev.key(),
        ctrl: ev.ctrl_key(),
        meta: ev.meta_key(),
        shift: ev.shift_key(),
        alt: ev.alt_key(),
    }
}

#[cfg(feature = "hydrate")]
fn target_kind(ev: &KeyboardEvent) -> TargetKind {
    use wasm_bindgen::JsCast;

    let Some(element) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
        return TargetKind::Other;
    };
    let role = element.get_attribute("role");
    let content_editable = element
        .dyn_ref::<web_sys::HtmlElement>()
        .is_some_and(web_sys::HtmlElement::is_content_editable);
    if is_editable_target(&element.tag_name(), role.as_deref(), content_editable) {
        TargetKind::Editable
    } else {
        TargetKind::Other
    }
}
