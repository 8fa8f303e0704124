use super::*;

// =============================================================
// Construction
// =============================================================

#[test]
fn new_history_has_single_snapshot_at_cursor_zero() {
    let history = History::new(7, 5);
    assert_eq!(*history.present(), 7);
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn default_limit_is_twenty() {
    let history = History::with_default_limit("a");
    assert_eq!(history.limit(), 20);
}

#[test]
fn zero_limit_still_keeps_present() {
    let mut history = History::new(0, 0);
    assert_eq!(history.limit(), 1);
    assert!(history.set(1));
    assert_eq!(*history.present(), 1);
    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
}

// =============================================================
// set
// =============================================================

#[test]
fn set_appends_and_advances_cursor() {
    let mut history = History::new(0, 10);
    assert!(history.set(1));
    assert!(history.set(2));
    assert_eq!(*history.present(), 2);
    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 2);
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn set_with_equal_value_is_noop() {
    let mut history = History::new(0, 10);
    history.set(1);
    history.set(2);
    history.undo();
    let before = history.clone();

    assert!(!history.set(1));
    assert_eq!(history, before);
    assert!(history.can_undo());
    assert!(history.can_redo());
    assert_eq!(history.len(), 3);
}

#[test]
fn update_computes_from_present() {
    let mut history = History::new(vec![1], 10);
    assert!(history.update(|v| {
        let mut next = v.clone();
        next.push(2);
        next
    }));
    assert_eq!(history.present(), &vec![1, 2]);
}

#[test]
fn update_returning_same_value_is_noop() {
    let mut history = History::new(String::from("x"), 10);
    assert!(!history.update(Clone::clone));
    assert_eq!(history.len(), 1);
}

#[test]
fn set_after_undo_discards_redo_future() {
    let mut history = History::new(0, 10);
    history.set(1);
    history.set(2);
    history.set(3);
    history.undo();
    history.undo();
    assert!(history.can_redo());

    history.set(9);
    assert!(!history.can_redo());
    assert_eq!(history.snapshots().copied().collect::<Vec<_>>(), vec![0, 1, 9]);
    assert_eq!(*history.present(), 9);
}

// =============================================================
// Limit
// =============================================================

#[test]
fn limit_three_keeps_three_most_recent() {
    let mut history = History::new(0, 3);
    for v in 1..=4 {
        history.set(v);
    }
    assert_eq!(history.snapshots().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    assert_eq!(*history.present(), 4);
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn length_never_exceeds_limit() {
    for limit in 1..6 {
        let mut history = History::new(0, limit);
        for v in 1..40 {
            history.set(v);
            assert!(history.len() <= limit);
            assert!(history.cursor() < history.len());
            if v % 3 == 0 {
                history.undo();
            }
        }
    }
}

#[test]
fn overflow_keeps_present_after_undo_then_set() {
    let mut history = History::new(0, 3);
    history.set(1);
    history.set(2);
    history.undo();
    history.set(5);
    history.set(6);
    assert_eq!(history.snapshots().copied().collect::<Vec<_>>(), vec![1, 5, 6]);
    assert_eq!(*history.present(), 6);
    assert_eq!(history.cursor(), 2);
}

// =============================================================
// undo / redo
// =============================================================

#[test]
fn undo_then_redo_restores_present() {
    let mut history = History::new(0, 4);
    for v in 1..=6 {
        history.set(v);
    }
    let before = *history.present();
    assert!(history.undo());
    assert!(history.redo());
    assert_eq!(*history.present(), before);
}

#[test]
fn undo_at_oldest_snapshot_is_noop() {
    let mut history = History::new("only", 4);
    assert!(!history.undo());
    assert_eq!(*history.present(), "only");
}

#[test]
fn redo_at_newest_snapshot_is_noop() {
    let mut history = History::new(1, 4);
    history.set(2);
    assert!(!history.redo());
    assert_eq!(*history.present(), 2);
}

#[test]
fn undo_and_redo_do_not_change_length() {
    let mut history = History::new(0, 10);
    history.set(1);
    history.set(2);
    history.undo();
    history.undo();
    history.redo();
    assert_eq!(history.len(), 3);
    assert_eq!(*history.present(), 1);
}

// =============================================================
// reset
// =============================================================

#[test]
fn reset_discards_everything() {
    let mut history = History::new(0, 10);
    history.set(1);
    history.set(2);
    history.undo();
    history.reset(42);
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
    assert_eq!(*history.present(), 42);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.limit(), 10);
}
