//! Presentation state for browsing and editing tasks.
//!
//! `Board` holds what a task window keeps between user actions: the search text,
//! the current page, the page size and whether the form is creating a new task or
//! editing an existing one. Every action goes straight to the [`Store`] and the
//! caller re-renders from the returned [`Page`].

use crate::query::{DEFAULT_PAGE_SIZE, Page, PageRequest};
use crate::store::{Store, StoreError};
use crate::types::{TaskFields, ValidationError};
use chrono::Utc;
use eyre::Result;
use log::debug;

/// Whether the task form creates a new task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(i64),
}

/// Transient view state over the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
    pub mode: FormMode,
    /// Page count from the last refresh
    pub total_pages: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            mode: FormMode::Create,
            total_pages: 1,
        }
    }
}

/// A store plus the view state driving it.
pub struct Board {
    store: Store,
    state: ViewState,
}

impl Board {
    /// Create a board on the first page with the given page size.
    pub fn new(store: Store, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(eyre::eyre!(StoreError::Validation(ValidationError::InvalidPageSize)));
        }
        Ok(Self {
            store,
            state: ViewState {
                page_size,
                ..ViewState::default()
            },
        })
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    fn request(&self) -> PageRequest {
        PageRequest::new()
            .search(self.state.search.clone())
            .page(self.state.page)
            .page_size(self.state.page_size)
    }

    /// Load the current page and remember the page count.
    pub fn refresh(&mut self) -> Result<Page> {
        let page = self.store.query_page(&self.request())?;
        self.state.total_pages = page.total_pages();
        Ok(page)
    }

    /// Change the search text and go back to the first page.
    pub fn search(&mut self, term: impl Into<String>) -> Result<Page> {
        self.state.search = term.into();
        self.state.page = 1;
        self.refresh()
    }

    /// Advance one page if not on the last one.
    pub fn next_page(&mut self) -> Result<Page> {
        if self.state.page < self.state.total_pages {
            self.state.page += 1;
        }
        self.refresh()
    }

    /// Go back one page if not on the first one.
    pub fn prev_page(&mut self) -> Result<Page> {
        if self.state.page > 1 {
            self.state.page -= 1;
        }
        self.refresh()
    }

    /// Jump to a page, clamped to the available range.
    pub fn go_to_page(&mut self, page: u32) -> Result<Page> {
        // total_pages may be stale; refresh it before clamping
        self.refresh()?;
        self.state.page = page.clamp(1, self.state.total_pages);
        self.refresh()
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<Page> {
        if page_size == 0 {
            return Err(eyre::eyre!(StoreError::Validation(ValidationError::InvalidPageSize)));
        }
        self.state.page_size = page_size;
        self.state.page = 1;
        self.refresh()
    }

    /// Switch the form to edit mode for `id`, returning its fields as a prefill.
    ///
    /// Returns `None` and stays in the current mode if the task does not exist.
    pub fn start_edit(&mut self, id: i64) -> Result<Option<TaskFields>> {
        let Some(task) = self.store.get_task(id)? else {
            return Ok(None);
        };
        self.state.mode = FormMode::Edit(id);
        debug!("Editing task {}", id);
        Ok(Some(task.fields()))
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.state.mode = FormMode::Create;
    }

    /// Save the form. Creates a task or updates the one being edited.
    ///
    /// Returns the id of the task written. On a validation failure the mode is kept.
    pub fn submit(&mut self, fields: &TaskFields) -> Result<i64> {
        match self.state.mode {
            FormMode::Create => {
                let id = self.store.add_task(fields, Utc::now().timestamp())?;
                self.state.page = 1;
                Ok(id)
            }
            FormMode::Edit(id) => {
                self.store.update_task(id, fields)?;
                self.state.mode = FormMode::Create;
                Ok(id)
            }
        }
    }

    /// Flip a task's done flag.
    pub fn toggle(&mut self, id: i64) -> Result<()> {
        self.store.toggle_done(id)
    }

    /// Delete the selected tasks and go back to the first page.
    pub fn delete(&mut self, ids: &[i64]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.store.delete_tasks(ids)?;
        if let FormMode::Edit(editing) = self.state.mode
            && ids.contains(&editing)
        {
            self.state.mode = FormMode::Create;
        }
        self.state.page = 1;
        Ok(())
    }

    /// `(done, total)` for the current filter.
    pub fn stats(&self) -> Result<(u64, u64)> {
        let page = self.store.query_page(&self.request().page(1).page_size(1))?;
        Ok((page.done, page.total))
    }
}
