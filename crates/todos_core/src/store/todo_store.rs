//! JSON-file backed to-do store.
//!
//! # Responsibility
//! - Load the collection once per session and hold it as the source of truth.
//! - Provide upsert/remove/lookup with whole-file atomic rewrite.
//!
//! # Invariants
//! - At most one record per id; order is insertion order.
//! - After every successful mutation the file equals the in-memory collection.
//! - A failed write rolls the in-memory mutation back, so memory never
//!   diverges from disk.
//! - Readers never observe a half-written file (temp file + fsync + rename).

use crate::config::TodosConfig;
use crate::model::todo::{Todo, TodoId, TodoRow, TodoValidationError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for load, persist and lookup operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(TodoValidationError),
    Io { path: PathBuf, source: io::Error },
    Serialize(serde_json::Error),
    NotFound(TodoId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Serialize(err) => write!(f, "invalid todo data: {err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TodoValidationError> for StoreError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No record had this id; the record was appended.
    Inserted,
    /// A record with this id was replaced at its existing position.
    Replaced,
}

impl SaveOutcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Replaced => "replaced",
        }
    }
}

/// In-memory to-do collection mirrored to one JSON file.
#[derive(Debug)]
pub struct TodoStore {
    path: PathBuf,
    todos: Vec<Todo>,
}

impl TodoStore {
    /// Loads the collection from `path`.
    ///
    /// A missing or malformed file is not fatal: the store starts empty and
    /// the failure is logged.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let started_at = Instant::now();

        let todos = match read_todos_file(&path) {
            Ok(todos) => {
                info!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    todos.len(),
                    started_at.elapsed().as_millis()
                );
                todos
            }
            Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok count=0 reason=no_file path={}",
                    path.display()
                );
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Vec::new()
            }
        };

        Self { path, todos }
    }

    /// Loads the collection from the configured store location.
    pub fn open_default(config: &TodosConfig) -> Self {
        Self::load(config.store_path())
    }

    /// Location of the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Looks up one record by id.
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// List-view projection in display order.
    pub fn rows(&self) -> Vec<TodoRow> {
        self.todos.iter().map(Todo::row).collect()
    }

    /// Inserts or replaces a record by id, then rewrites the file.
    ///
    /// # Errors
    /// - `Validation` when the record is invalid; nothing is mutated.
    /// - `Io`/`Serialize` when the write fails; the mutation is rolled back.
    pub fn save(&mut self, todo: Todo) -> StoreResult<SaveOutcome> {
        todo.validate()?;
        let started_at = Instant::now();
        let id = todo.id.clone();

        let (outcome, replaced) = match self.position(&id) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.todos[index], todo);
                (SaveOutcome::Replaced, Some((index, previous)))
            }
            None => {
                self.todos.push(todo);
                (SaveOutcome::Inserted, None)
            }
        };

        if let Err(err) = self.persist() {
            match replaced {
                Some((index, previous)) => self.todos[index] = previous,
                None => {
                    self.todos.pop();
                }
            }
            error!(
                "event=store_save module=store status=error id={} duration_ms={} error={}",
                id,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_save module=store status=ok id={} outcome={} count={} duration_ms={}",
            id,
            outcome.as_str(),
            self.todos.len(),
            started_at.elapsed().as_millis()
        );
        Ok(outcome)
    }

    /// Removes a record by id, then rewrites the file.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    /// - `NotFound` when no record has this id; the file is not touched.
    /// - `Io`/`Serialize` when the write fails; the record is put back.
    pub fn remove(&mut self, id: &str) -> StoreResult<Todo> {
        let started_at = Instant::now();
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.todos.remove(index);

        if let Err(err) = self.persist() {
            self.todos.insert(index, removed);
            error!(
                "event=store_remove module=store status=error id={} duration_ms={} error={}",
                id,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_remove module=store status=ok id={} count={} duration_ms={}",
            id,
            self.todos.len(),
            started_at.elapsed().as_millis()
        );
        Ok(removed)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }

    fn persist(&self) -> StoreResult<()> {
        write_todos_file(&self.path, &self.todos)
    }
}

fn read_todos_file(path: &Path) -> StoreResult<Vec<Todo>> {
    let bytes = fs::read(path).map_err(|source| io_error(path, source))?;
    let todos: Vec<Todo> = serde_json::from_slice(&bytes)?;
    Ok(dedupe_by_id(todos))
}

/// Keeps the first record for each id; later duplicates are dropped.
fn dedupe_by_id(todos: Vec<Todo>) -> Vec<Todo> {
    let total = todos.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Todo> = todos
        .into_iter()
        .filter(|todo| seen.insert(todo.id.clone()))
        .collect();

    if unique.len() != total {
        warn!(
            "event=store_load module=store status=repaired dropped_duplicates={}",
            total - unique.len()
        );
    }
    unique
}

fn write_todos_file(path: &Path, todos: &[Todo]) -> StoreResult<()> {
    let bytes = serde_json::to_vec(todos)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    let mut file = NamedTempFile::new_in(parent).map_err(|source| io_error(parent, source))?;
    file.write_all(&bytes)
        .map_err(|source| io_error(file.path(), source))?;
    file.as_file()
        .sync_all()
        .map_err(|source| io_error(file.path(), source))?;
    file.persist(path)
        .map_err(|err| io_error(path, err.error))?;
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
