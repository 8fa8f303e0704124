use super::*;

#[test]
fn newest_ticket_is_current() {
    let generation = Generation::new();
    let ticket = generation.begin();
    assert!(generation.is_current(ticket));
}

#[test]
fn begin_makes_previous_ticket_stale() {
    let generation = Generation::new();
    let first = generation.begin();
    let second = generation.begin();
    assert!(!generation.is_current(first));
    assert!(generation.is_current(second));
}

#[test]
fn invalidate_makes_all_tickets_stale() {
    let generation = Generation::new();
    let ticket = generation.begin();
    generation.invalidate();
    assert!(!generation.is_current(ticket));
}

#[test]
fn clones_share_the_counter() {
    let generation = Generation::new();
    let other = generation.clone();
    let ticket = generation.begin();
    other.invalidate();
    assert!(!generation.is_current(ticket));
}

#[test]
fn default_generation_has_no_current_ticket_until_begin() {
    let generation = Generation::new();
    let stale = Ticket(5);
    assert!(!generation.is_current(stale));
}
