//! Storage layer for tasktable: a single SQLite file.

use crate::query::{PageRequest, SEARCH_PREDICATE};
use crate::types::{Category, Priority, Task};
use eyre::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

/// Columns selected for a full task row, in `row_to_task` order.
const TASK_COLUMNS: &str = "id, title, description, time, category, priority, created, done";

/// Storage handle for reading/writing tasks and categories.
pub struct Storage {
    path: PathBuf,
    db: Connection,
}

impl Storage {
    /// Open the database file, creating it and the schema if absent.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let db = Connection::open(path).context("Failed to open SQLite database")?;
        db.execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;

        let storage = Self {
            path: path.to_path_buf(),
            db,
        };

        storage.init_schema()?;

        Ok(storage)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create tables and the search index if they don't exist.
    pub fn init_schema(&self) -> Result<()> {
        self.db
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS categories (
                    id INTEGER PRIMARY KEY,
                    name TEXT UNIQUE NOT NULL
                );

                CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT,
                    time TEXT,
                    category TEXT,
                    priority TEXT CHECK (priority IN ('high', 'medium', 'low')),
                    created INTEGER,
                    done INTEGER DEFAULT 0
                );
                CREATE INDEX IF NOT EXISTS idx_tasks_search ON tasks(title, description, category);
            "#,
            )
            .context("Failed to initialize schema")?;

        Ok(())
    }

    /// Insert a category. Returns false if the name already exists.
    pub fn insert_category(&self, name: &str) -> Result<bool> {
        let inserted = self
            .db
            .execute("INSERT OR IGNORE INTO categories (name) VALUES (?)", params![name])
            .context("Failed to insert category")?;
        Ok(inserted == 1)
    }

    /// All categories ordered by name.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.db.prepare("SELECT id, name FROM categories ORDER BY name")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    /// Insert a task row and return its id.
    ///
    /// `priority` is the raw column literal; anything outside the CHECK set is rejected by SQLite.
    pub fn insert_task(
        &self,
        title: &str,
        description: Option<&str>,
        time: Option<&str>,
        category: Option<&str>,
        priority: &str,
        created: i64,
    ) -> Result<i64> {
        self.db
            .execute(
                r#"
                INSERT INTO tasks (title, description, time, category, priority, created)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
                params![title, description, time, category, priority, created],
            )
            .context("Failed to insert task")?;

        Ok(self.db.last_insert_rowid())
    }

    /// Replace the mutable fields of a task. Returns the number of rows changed.
    pub fn update_task(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        time: Option<&str>,
        category: Option<&str>,
        priority: &str,
    ) -> Result<usize> {
        let changed = self
            .db
            .execute(
                r#"
                UPDATE tasks SET title = ?, description = ?, time = ?, category = ?, priority = ?
                WHERE id = ?
                "#,
                params![title, description, time, category, priority, id],
            )
            .context("Failed to update task")?;
        Ok(changed)
    }

    /// Flip the done flag in a single statement.
    pub fn toggle_done(&self, id: i64) -> Result<usize> {
        let changed = self
            .db
            .execute("UPDATE tasks SET done = 1 - done WHERE id = ?", params![id])
            .context("Failed to toggle task")?;
        Ok(changed)
    }

    /// Delete every listed id inside one transaction.
    pub fn delete_tasks(&mut self, ids: &[i64]) -> Result<usize> {
        let tx = self.db.transaction().context("Failed to begin transaction")?;
        let mut deleted = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM tasks WHERE id = ?")?;
            for id in ids {
                deleted += stmt.execute(params![id])?;
            }
        }
        tx.commit().context("Failed to commit delete")?;
        Ok(deleted)
    }

    /// Get a task by id.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        let sql = format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS);
        let task = self
            .db
            .query_row(&sql, params![id], Self::row_to_task)
            .optional()?;
        Ok(task)
    }

    /// Rows for one page, newest first.
    pub fn query_tasks(&self, request: &PageRequest) -> Result<Vec<Task>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM tasks
            WHERE {}
            ORDER BY created DESC, id DESC
            LIMIT ?2 OFFSET ?3
            "#,
            TASK_COLUMNS, SEARCH_PREDICATE
        );

        let limit = i64::from(request.page_size);
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let mut stmt = self.db.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![request.search, limit, offset], Self::row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Count (total, done) over the search filter, ignoring pagination.
    pub fn count_matching(&self, search: &str) -> Result<(u64, u64)> {
        let sql = format!(
            "SELECT COUNT(*), COALESCE(SUM(done), 0) FROM tasks WHERE {}",
            SEARCH_PREDICATE
        );
        let (total, done): (i64, i64) = self
            .db
            .query_row(&sql, params![search], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok((total.max(0) as u64, done.max(0) as u64))
    }

    /// Every task in row order, no filter.
    pub fn all_tasks(&self) -> Result<Vec<Task>> {
        let sql = format!("SELECT {} FROM tasks ORDER BY id", TASK_COLUMNS);
        let mut stmt = self.db.prepare(&sql)?;
        let tasks = stmt
            .query_map([], Self::row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Total number of task rows.
    pub fn count_tasks(&self) -> Result<u64> {
        let count: i64 = self
            .db
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Convert a database row to a Task.
    fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let priority_str: Option<String> = row.get(5)?;
        let priority = match priority_str.as_deref() {
            Some("medium") => Priority::Medium,
            Some("low") => Priority::Low,
            _ => Priority::High,
        };

        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            time: row.get(3)?,
            category: row.get(4)?,
            priority,
            created: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
            done: row.get::<_, Option<bool>>(7)?.unwrap_or(false),
        })
    }
}
