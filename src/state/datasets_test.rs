use super::*;

fn summary(id: &str, name: &str) -> DatasetSummary {
    DatasetSummary { id: id.to_owned(), name: name.to_owned(), row_count: 0, column_count: 0, created_at: None }
}

#[test]
fn default_is_empty_and_idle() {
    let state = DatasetsState::default();
    assert!(state.items.is_empty());
    assert!(!state.loading);
    assert!(!state.uploading);
    assert!(state.error.is_none());
}

#[test]
fn upsert_appends_new_dataset() {
    let mut state = DatasetsState::default();
    state.upsert(summary("d1", "a.csv"));
    state.upsert(summary("d2", "b.csv"));
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].id, "d2");
}

#[test]
fn upsert_replaces_in_place() {
    let mut state = DatasetsState::default();
    state.upsert(summary("d1", "a.csv"));
    state.upsert(summary("d2", "b.csv"));
    state.upsert(summary("d1", "renamed.csv"));
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].name, "renamed.csv");
}

#[test]
fn remove_reports_whether_found() {
    let mut state = DatasetsState::default();
    state.upsert(summary("d1", "a.csv"));
    assert!(!state.remove("missing"));
    assert!(state.remove("d1"));
    assert!(state.get("d1").is_none());
}
