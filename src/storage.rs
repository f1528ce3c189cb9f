// Manages local file storage for the task list.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the Task struct serialization require incrementing
// LOCAL_STORAGE_VERSION below.
use crate::context::AppContext;
use crate::model::Task;
use crate::store::TaskList;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: uid, text, completed, due_date, priority, source
const LOCAL_STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct LocalStorageData {
    #[serde(default)]
    version: u32,
    tasks: Vec<Task>,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.as_os_str().to_owned();
        lock_path.push(".lock");
        PathBuf::from(lock_path)
    }

    /// Runs `f` while holding an exclusive lock on `<file>.lock`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Task>> {
        let path = ctx.get_task_file_path()?;
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(&path, || Self::read_tasks(&path))
    }

    pub fn save(ctx: &dyn AppContext, tasks: &[Task]) -> Result<()> {
        let path = ctx.get_task_file_path()?;
        Self::with_lock(&path, || Self::write_tasks(&path, tasks))
    }

    /// Load, change and write the task list under a single lock.
    ///
    /// Nothing is written when `f` fails.
    pub fn modify<F, T>(ctx: &dyn AppContext, f: F) -> Result<T>
    where
        F: FnOnce(&mut TaskList) -> Result<T>,
    {
        let path = ctx.get_task_file_path()?;
        Self::with_lock(&path, || {
            let mut list = TaskList::new(Self::read_tasks(&path)?);
            let result = f(&mut list)?;
            Self::write_tasks(&path, list.tasks())?;
            Ok(result)
        })
    }

    // Callers hold the lock.
    fn read_tasks(path: &Path) -> Result<Vec<Task>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        let json = fs::read_to_string(path)?;
        let data: LocalStorageData = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse task file {:?}", path))?;
        if data.version > LOCAL_STORAGE_VERSION {
            anyhow::bail!(
                "Task file {:?} has version {}, this build understands up to {}",
                path,
                data.version,
                LOCAL_STORAGE_VERSION
            );
        }
        log::debug!("Loaded {} tasks from {:?}", data.tasks.len(), path);
        Ok(data.tasks)
    }

    fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
        let data = LocalStorageData {
            version: LOCAL_STORAGE_VERSION,
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(path, json)
    }
}
