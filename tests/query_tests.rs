//! Integration tests for search and pagination.
//!
//! Tests ordering, filtering, page arithmetic and the done/total counts.

mod common;

use common::TestEnv;
use std::collections::HashSet;
use tasktable::{Priority, TaskFields};

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_insert_then_read_back() {
    let mut env = TestEnv::new();

    let fields = TaskFields::new("Prepare slides")
        .with_description("Quarterly review deck")
        .with_time("3h")
        .with_category("Work")
        .with_priority(Priority::Medium);
    let id = env.add_full_task(&fields, 1_650_000_000);

    let task = env.get(id);
    assert_eq!(task.id, id);
    assert_eq!(task.fields(), fields);
    assert_eq!(task.created, 1_650_000_000);
    assert!(!task.done);
}

#[test]
fn test_toggle_twice_restores_state() {
    let mut env = TestEnv::new();
    let id = env.add_task("Flip me", 1);

    env.store.toggle_done(id).unwrap();
    assert!(env.get(id).done);
    env.store.toggle_done(id).unwrap();
    assert!(!env.get(id).done);
}

// =============================================================================
// Ordering and Pages
// =============================================================================

#[test]
fn test_end_to_end_order_and_done_count() {
    let mut env = TestEnv::new();

    let a = env.add_task_with_priority("A", Priority::High, 100);
    let b = env.add_task_with_priority("B", Priority::Low, 200);

    let page = env.page("", 1, 20);
    let ids: Vec<i64> = page.tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b, a]);
    assert_eq!(page.done, 0);
    assert_eq!(page.total, 2);

    env.store.toggle_done(a).unwrap();

    let page = env.page("", 1, 20);
    assert_eq!(page.done, 1);
    let row_a = page.tasks.iter().find(|t| t.id == a).unwrap();
    assert!(row_a.done);
    let row_b = page.tasks.iter().find(|t| t.id == b).unwrap();
    assert!(!row_b.done);
}

#[test]
fn test_pages_concatenate_to_full_result() {
    let mut env = TestEnv::new();
    env.seed(23);
    // Some rows that the search term below will not match
    env.add_task("unrelated", 5_000);
    env.add_task("another one", 5_001);

    for page_size in [1, 4, 7, 23, 50] {
        let full = env.page("Task", 1, 1_000);
        let total_pages = env.page("Task", 1, page_size).total_pages();

        let mut concatenated = Vec::new();
        for page in 1..=total_pages {
            concatenated.extend(env.page("Task", page, page_size).tasks);
        }

        let full_ids: Vec<i64> = full.tasks.iter().map(|t| t.id).collect();
        let concat_ids: Vec<i64> = concatenated.iter().map(|t| t.id).collect();
        assert_eq!(concat_ids, full_ids, "page_size {}", page_size);

        let unique: HashSet<i64> = concat_ids.iter().copied().collect();
        assert_eq!(unique.len(), concat_ids.len());
        assert_eq!(concat_ids.len(), 23);
    }
}

#[test]
fn test_results_sorted_newest_first() {
    let mut env = TestEnv::new();
    env.add_task("middle", 500);
    env.add_task("oldest", 100);
    env.add_task("newest", 900);

    assert_eq!(env.page_titles("", 1, 20), vec!["newest", "middle", "oldest"]);
}

#[test]
fn test_total_pages_boundaries() {
    let page_size = 5;
    for (count, expected) in [(0, 1), (1, 1), (4, 1), (5, 1), (6, 2)] {
        let mut env = TestEnv::new();
        env.seed(count);
        let page = env.page("", 1, page_size);
        assert_eq!(page.total, count as u64);
        assert_eq!(page.total_pages(), expected, "count {}", count);
    }
}

#[test]
fn test_page_past_end_is_empty() {
    let mut env = TestEnv::new();
    env.seed(3);

    let page = env.page("", 9, 2);
    assert!(page.tasks.is_empty());
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 9);
}

#[test]
fn test_empty_store_single_page() {
    let env = TestEnv::new();
    let page = env.page("", 1, 20);
    assert!(page.tasks.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.done, 0);
    assert_eq!(page.total_pages(), 1);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_matches_title_description_and_category() {
    let mut env = TestEnv::new();
    env.add_full_task(&TaskFields::new("garden fence"), 1);
    env.add_full_task(&TaskFields::new("Call bank").with_description("about the garden loan"), 2);
    env.add_full_task(&TaskFields::new("Buy seeds").with_category("garden"), 3);
    env.add_full_task(&TaskFields::new("Unrelated"), 4);

    let titles = env.page_titles("garden", 1, 20);
    assert_eq!(titles, vec!["Buy seeds", "Call bank", "garden fence"]);
}

#[test]
fn test_search_is_case_sensitive() {
    let mut env = TestEnv::new();
    env.add_task("Report", 1);
    env.add_task("report", 2);

    assert_eq!(env.page_titles("Report", 1, 20), vec!["Report"]);
    assert_eq!(env.page_titles("report", 1, 20), vec!["report"]);
    assert!(env.page_titles("REPORT", 1, 20).is_empty());
}

#[test]
fn test_search_wildcards_are_literal() {
    let mut env = TestEnv::new();
    env.add_task("100% done", 1);
    env.add_task("1000 items", 2);
    env.add_task("snake_case", 3);
    env.add_task("snakeXcase", 4);

    assert_eq!(env.page_titles("0%", 1, 20), vec!["100% done"]);
    assert_eq!(env.page_titles("e_c", 1, 20), vec!["snake_case"]);
}

#[test]
fn test_counts_follow_filter() {
    let mut env = TestEnv::new();
    let a = env.add_task("alpha one", 1);
    let b = env.add_task("alpha two", 2);
    let c = env.add_task("beta", 3);
    env.store.toggle_done(a).unwrap();
    env.store.toggle_done(c).unwrap();

    let alpha = env.page("alpha", 1, 1);
    assert_eq!(alpha.total, 2);
    assert_eq!(alpha.done, 1);
    assert_eq!(alpha.tasks.len(), 1);
    assert_eq!(alpha.tasks[0].id, b);

    let all = env.page("", 1, 20);
    assert_eq!(all.total, 3);
    assert_eq!(all.done, 2);
}

#[test]
fn test_empty_search_matches_null_fields() {
    let mut env = TestEnv::new();
    // No description or category stored
    env.add_task("bare", 1);
    assert_eq!(env.page("", 1, 20).total, 1);
    assert_eq!(env.page("bar", 1, 20).total, 1);
}
