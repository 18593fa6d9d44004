//! Tests for the anytime word search.

use ultraghost::{IncrementalSearch, Letters, WordList};

fn letters() -> Letters {
    Letters::new("pie").unwrap()
}

fn list() -> WordList {
    WordList::from_words(["PICKLE", "PIPE", "MAIN", "PINE"])
}

#[test]
fn test_search_advances_one_batch_at_a_time() {
    let words = list();
    let mut search = IncrementalSearch::new(1, None);

    assert!(!search.advance(letters(), 4, &words));
    assert_eq!(search.best(), Some("PICKLE"));

    assert!(!search.advance(letters(), 4, &words));
    assert_eq!(search.best(), Some("PIPE"));

    // MAIN fails the constraint; the best stands.
    assert!(!search.advance(letters(), 4, &words));
    assert_eq!(search.best(), Some("PIPE"));

    assert!(search.advance(letters(), 4, &words));
    assert_eq!(search.best(), Some("PINE"));
    assert_eq!(search.cursor(), 4);
}

#[test]
fn test_large_batch_finishes_in_one_advance() {
    let words = list();
    let mut search = IncrementalSearch::new(100, None);
    assert!(search.advance(letters(), 4, &words));
    assert_eq!(search.best(), Some("PINE"));
}

#[test]
fn test_batch_cap_abandons_the_scan() {
    let words = list();
    let mut search = IncrementalSearch::new(1, Some(2));
    assert!(!search.advance(letters(), 4, &words));
    assert!(search.advance(letters(), 4, &words));
    // The cap ends the session before PINE is reached.
    assert_eq!(search.best(), Some("PIPE"));
    assert_eq!(search.cursor(), 2);
}

#[test]
fn test_finished_session_stays_put() {
    let words = list();
    let mut search = IncrementalSearch::new(1, Some(1));
    assert!(search.advance(letters(), 4, &words));
    assert!(search.advance(letters(), 4, &words));
    assert_eq!(search.cursor(), 1);
}

#[test]
fn test_empty_list_finishes_immediately() {
    let words = WordList::new();
    let mut search = IncrementalSearch::new(5, None);
    assert!(search.advance(letters(), 4, &words));
    assert_eq!(search.best(), None);
}

#[test]
fn test_minimum_length_filters_candidates() {
    let words = list();
    let mut search = IncrementalSearch::new(100, None);
    search.advance(letters(), 5, &words);
    assert_eq!(search.best(), Some("PICKLE"));
}

#[test]
fn test_take_best_drains_the_session() {
    let words = list();
    let mut search = IncrementalSearch::new(100, None);
    search.advance(letters(), 4, &words);
    assert_eq!(search.take_best(), Some("PINE".to_string()));
    assert_eq!(search.best(), None);
}
