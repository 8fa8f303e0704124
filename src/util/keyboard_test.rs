use std::cell::Cell;
use std::rc::Rc;

use super::*;

/// Registration that tracks how many listeners are live on its target.
struct Counted {
    live: Rc<Cell<i32>>,
}

impl Counted {
    fn attach(live: &Rc<Cell<i32>>) -> Self {
        live.set(live.get() + 1);
        Self { live: Rc::clone(live) }
    }
}

impl Detach for Counted {
    fn detach(self) {
        self.live.set(self.live.get() - 1);
    }
}

#[test]
fn disabled_slot_attaches_nothing() {
    let live = Rc::new(Cell::new(0));
    let mut slot = ListenerSlot::default();
    slot.sync(false, || Counted::attach(&live));
    assert!(!slot.is_attached());
    assert_eq!(live.get(), 0);
}

#[test]
fn toggling_never_stacks_listeners() {
    let live = Rc::new(Cell::new(0));
    let mut slot = ListenerSlot::default();
    for _ in 0..5 {
        slot.sync(true, || Counted::attach(&live));
        assert_eq!(live.get(), 1);
        slot.sync(false, || Counted::attach(&live));
        assert_eq!(live.get(), 0);
    }
}

#[test]
fn resync_while_enabled_replaces_listener() {
    let live = Rc::new(Cell::new(0));
    let mut slot = ListenerSlot::default();
    slot.sync(true, || Counted::attach(&live));
    slot.sync(true, || Counted::attach(&live));
    assert_eq!(live.get(), 1);
}

#[test]
fn clear_on_unmount_detaches() {
    let live = Rc::new(Cell::new(0));
    let mut slot = ListenerSlot::default();
    slot.sync(true, || Counted::attach(&live));
    slot.clear();
    assert!(!slot.is_attached());
    assert_eq!(live.get(), 0);
    slot.clear();
    assert_eq!(live.get(), 0);
}
