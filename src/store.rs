//! High-level store API for tasktable.

use crate::query::{Page, PageRequest};
use crate::storage::Storage;
use crate::types::{Task, TaskFields, ValidationError};
use eyre::{Context, Result};
use log::{debug, info};
use std::path::Path;

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A category with this exact name already exists.
    DuplicateCategory(String),
    /// Validation error.
    Validation(ValidationError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateCategory(name) => write!(f, "category already exists: {}", name),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// The main tasktable store.
pub struct Store {
    storage: Storage,
}

impl Store {
    /// Open the store at the given database file, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let storage = Storage::open(path)?;
        info!("Opened task database at {}", path.display());
        Ok(Self { storage })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Ensure tables and index exist. Safe to call repeatedly.
    pub fn create_schema(&self) -> Result<()> {
        self.storage.init_schema()
    }

    /// Add a category. Names are unique and compared exactly.
    pub fn add_category(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(eyre::eyre!(StoreError::Validation(ValidationError::EmptyCategory)));
        }

        if !self.storage.insert_category(name)? {
            return Err(eyre::eyre!(StoreError::DuplicateCategory(name.to_string())));
        }

        info!("Added category {:?}", name);
        Ok(())
    }

    /// All category names in ascending order.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        Ok(self
            .storage
            .list_categories()?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// Add a task created at `created_at` (epoch seconds). Returns the new id.
    pub fn add_task(&mut self, fields: &TaskFields, created_at: i64) -> Result<i64> {
        fields
            .validate()
            .map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;

        let id = self
            .storage
            .insert_task(
                &fields.title,
                fields.description.as_deref(),
                fields.time.as_deref(),
                fields.category.as_deref(),
                fields.priority.as_str(),
                created_at,
            )
            .context("Failed to persist task")?;

        info!("Added task {} {:?}", id, fields.title);
        Ok(id)
    }

    /// Replace title, description, time, category and priority. Unknown ids are ignored.
    pub fn update_task(&mut self, id: i64, fields: &TaskFields) -> Result<()> {
        fields
            .validate()
            .map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;

        let changed = self
            .storage
            .update_task(
                id,
                &fields.title,
                fields.description.as_deref(),
                fields.time.as_deref(),
                fields.category.as_deref(),
                fields.priority.as_str(),
            )
            .context("Failed to persist task update")?;

        debug!("Updated task {} ({} row(s))", id, changed);
        Ok(())
    }

    /// Flip a task's completion flag. Unknown ids are ignored.
    pub fn toggle_done(&mut self, id: i64) -> Result<()> {
        let changed = self.storage.toggle_done(id)?;
        debug!("Toggled task {} ({} row(s))", id, changed);
        Ok(())
    }

    /// Delete all listed tasks. Ids that don't exist are ignored.
    pub fn delete_tasks(&mut self, ids: &[i64]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let deleted = self.storage.delete_tasks(ids)?;
        info!("Deleted {} of {} requested task(s)", deleted, ids.len());
        Ok(())
    }

    /// Get a task by id.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.storage.get_task(id)
    }

    /// One page of the filtered task list plus total and done counts.
    ///
    /// A page past the end yields an empty row set rather than an error.
    pub fn query_page(&self, request: &PageRequest) -> Result<Page> {
        request
            .validate()
            .map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;

        let (total, done) = self.storage.count_matching(&request.search)?;
        let tasks = self.storage.query_tasks(request)?;

        Ok(Page {
            tasks,
            page: request.page,
            page_size: request.page_size,
            total,
            done,
        })
    }

    /// Every task, unfiltered and unpaginated.
    pub fn export_all(&self) -> Result<Vec<Task>> {
        self.storage.all_tasks()
    }

    /// Total number of tasks.
    pub fn count_tasks(&self) -> Result<u64> {
        self.storage.count_tasks()
    }
}
