//! Shared test infrastructure for tasktable integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use tasktable::{Page, PageRequest, Priority, Store, Task, TaskFields};
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: Store,
}

impl TestEnv {
    /// Create a new test environment with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(&temp_dir.path().join("tasks.db")).expect("Failed to open store");
        Self { temp_dir, store }
    }

    /// Add a task with default priority at the given timestamp.
    pub fn add_task(&mut self, title: &str, created: i64) -> i64 {
        self.store
            .add_task(&TaskFields::new(title), created)
            .expect("Failed to add task")
    }

    /// Add a task with a priority.
    pub fn add_task_with_priority(&mut self, title: &str, priority: Priority, created: i64) -> i64 {
        self.store
            .add_task(&TaskFields::new(title).with_priority(priority), created)
            .expect("Failed to add task")
    }

    /// Add a task with every field set.
    pub fn add_full_task(&mut self, fields: &TaskFields, created: i64) -> i64 {
        self.store.add_task(fields, created).expect("Failed to add task")
    }

    /// Add `count` tasks titled "Task 0".."Task n" with increasing timestamps.
    pub fn seed(&mut self, count: i64) -> Vec<i64> {
        (0..count)
            .map(|i| self.add_task(&format!("Task {}", i), 1_000 + i))
            .collect()
    }

    /// Fetch a task that must exist.
    pub fn get(&self, id: i64) -> Task {
        self.store
            .get_task(id)
            .expect("Failed to get task")
            .expect("Task not found")
    }

    /// Query one page.
    pub fn page(&self, search: &str, page: u32, page_size: u32) -> Page {
        self.store
            .query_page(&PageRequest::new().search(search).page(page).page_size(page_size))
            .expect("Failed to query page")
    }

    /// Titles on one page, in order.
    pub fn page_titles(&self, search: &str, page: u32, page_size: u32) -> Vec<String> {
        self.page(search, page, page_size)
            .tasks
            .into_iter()
            .map(|t| t.title)
            .collect()
    }

    /// Total number of tasks.
    pub fn total_count(&self) -> u64 {
        self.store.count_tasks().expect("Failed to count tasks")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
