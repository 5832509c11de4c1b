//! CSV export of every task.

use crate::store::Store;
use crate::types::{Task, format_created};
use eyre::{Context, Result};
use log::info;
use std::io::Write;
use std::path::Path;

/// Header row of the export file.
pub const CSV_HEADER: [&str; 7] = [
    "title",
    "description",
    "time",
    "category",
    "priority",
    "created",
    "status",
];

/// Status column value for a finished task.
pub const DONE_SYMBOL: &str = "✔";

/// Status column value for an open task.
pub const PENDING_SYMBOL: &str = "⏳";

/// Write every task in the store to `path` as CSV. Returns the number of rows written.
pub fn export_csv(store: &Store, path: &Path) -> Result<usize> {
    let tasks = store.export_all().context("Failed to load tasks for export")?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    let count = write_csv(&tasks, file)?;
    info!("Exported {} task(s) to {}", count, path.display());
    Ok(count)
}

/// Write tasks as CSV to any writer.
pub fn write_csv<W: Write>(tasks: &[Task], writer: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER).context("Failed to write CSV header")?;

    for task in tasks {
        let created = format_created(task.created);
        writer
            .write_record([
                task.title.as_str(),
                task.description.as_deref().unwrap_or_default(),
                task.time.as_deref().unwrap_or_default(),
                task.category.as_deref().unwrap_or_default(),
                task.priority.as_str(),
                created.as_str(),
                if task.done { DONE_SYMBOL } else { PENDING_SYMBOL },
            ])
            .with_context(|| format!("Failed to write task {}", task.id))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(tasks.len())
}
