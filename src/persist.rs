// Local cache and the bootstrap fallback chain

use crate::codec;
use crate::models::{Assignee, Status, Task, now_ms};
use crate::remote::RemoteSnapshot;
use chrono::Utc;
use eyre::{Context, Result};
use fs2::FileExt;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The single file holding the user's local (possibly unsynced) board state.
///
/// Reads and writes are whole-document replace: last writer wins, no merge.
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached collection. An absent or empty file means "no prior
    /// local state", not an error.
    pub fn load(&self) -> Result<Option<Vec<Task>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read local cache at {}", self.path.display()))?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let tasks: Vec<Task> =
            serde_json::from_str(&text).context("failed to parse local cache")?;
        Ok(Some(tasks))
    }

    /// Replace the cache with the given collection, unconditionally.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("failed to create cache directory")?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)
            .with_context(|| format!("failed to open local cache at {}", self.path.display()))?;

        // Acquire exclusive lock before writing
        file.lock_exclusive().context("failed to acquire cache lock")?;

        let json = serde_json::to_string(tasks)?;
        file.set_len(0)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        // Lock is automatically released when file is dropped
        Ok(())
    }
}

/// Where the bootstrapped collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapSource {
    Remote,
    Cache,
    Seed,
}

impl fmt::Display for BootstrapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapSource::Remote => write!(f, "remote snapshot"),
            BootstrapSource::Cache => write!(f, "local cache"),
            BootstrapSource::Seed => write!(f, "seed task"),
        }
    }
}

/// Load the board: remote snapshot, then local cache, then a seed task.
///
/// The chain never fails; a broken network or a corrupt cache degrades to
/// the next source and the UI keeps working. Pass `None` for `remote` to
/// skip the fetch and start the chain at the cache.
pub fn bootstrap(
    remote: Option<&dyn RemoteSnapshot>,
    cache: &LocalCache,
) -> (Vec<Task>, BootstrapSource) {
    if let Some(remote) = remote {
        match fetch_and_mirror(remote, cache) {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded tasks from remote snapshot");
                return (tasks, BootstrapSource::Remote);
            }
            Err(e) => warn!("remote snapshot unavailable, falling back to local cache: {e:#}"),
        }
    }

    match cache.load() {
        Ok(Some(tasks)) if !tasks.is_empty() => {
            info!(count = tasks.len(), "loaded tasks from local cache");
            (tasks, BootstrapSource::Cache)
        }
        Ok(_) => (vec![seed_task()], BootstrapSource::Seed),
        Err(e) => {
            warn!("unreadable local cache, starting from seed: {e:#}");
            (vec![seed_task()], BootstrapSource::Seed)
        }
    }
}

fn fetch_and_mirror(remote: &dyn RemoteSnapshot, cache: &LocalCache) -> Result<Vec<Task>> {
    let body = remote.fetch()?;
    let tasks = codec::parse_snapshot(&body).context("failed to parse remote snapshot")?;

    // Mirror the authoritative state over any prior local edits. A failed
    // mirror is logged but does not discard the fetched tasks.
    if let Err(e) = cache.save(&tasks) {
        warn!("failed to mirror snapshot into local cache: {e:#}");
    }

    Ok(tasks)
}

/// Starter task shown on a brand-new board.
pub fn seed_task() -> Task {
    Task {
        id: now_ms(),
        title: "Welcome to our Kanban! 🎉".to_string(),
        description: "Drag cards between columns. Click to edit.".to_string(),
        status: Status::Todo,
        assignee: Assignee::Both,
        created: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::eyre;
    use tempfile::TempDir;

    struct StaticRemote(String);

    impl RemoteSnapshot for StaticRemote {
        fn fetch(&self) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingRemote;

    impl RemoteSnapshot for FailingRemote {
        fn fetch(&self) -> Result<String> {
            Err(eyre!("connection refused"))
        }
    }

    fn cache_in(temp: &TempDir) -> LocalCache {
        LocalCache::new(temp.path().join("tasks.json"))
    }

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            status: Status::Todo,
            assignee: Assignee::Both,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_cache_load_absent_file() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_cache_save_then_load() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);

        let tasks = vec![task(1, "A"), task(2, "B")];
        cache.save(&tasks).unwrap();

        assert_eq!(cache.load().unwrap().unwrap(), tasks);
    }

    #[test]
    fn test_cache_save_overwrites_whole_document() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);

        cache.save(&[task(1, "Long title that pads the file out")]).unwrap();
        cache.save(&[task(2, "B")]).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
    }

    #[test]
    fn test_bootstrap_failed_fetch_empty_cache_yields_seed() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);

        let (tasks, source) = bootstrap(Some(&FailingRemote), &cache);

        assert_eq!(source, BootstrapSource::Seed);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, Status::Todo);
        assert_eq!(tasks[0].title, "Welcome to our Kanban! 🎉");
    }

    #[test]
    fn test_bootstrap_failed_fetch_falls_back_to_cache() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        cache.save(&[task(7, "Cached")]).unwrap();

        let (tasks, source) = bootstrap(Some(&FailingRemote), &cache);

        assert_eq!(source, BootstrapSource::Cache);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Cached");
    }

    #[test]
    fn test_bootstrap_remote_success_mirrors_into_cache() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        cache.save(&[task(99, "Stale local edit")]).unwrap();

        let upstream = vec![task(1, "A"), task(2, "B")];
        let body = format!(
            r#"{{"tasks": {}}}"#,
            serde_json::to_string(&upstream).unwrap()
        );

        let (tasks, source) = bootstrap(Some(&StaticRemote(body)), &cache);

        assert_eq!(source, BootstrapSource::Remote);
        assert_eq!(tasks, upstream);
        // Cache now mirrors the snapshot, prior local edits gone.
        assert_eq!(cache.load().unwrap().unwrap(), upstream);
    }

    #[test]
    fn test_bootstrap_remote_garbage_falls_back() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        cache.save(&[task(7, "Cached")]).unwrap();

        let (tasks, source) = bootstrap(Some(&StaticRemote("<html>502</html>".to_string())), &cache);

        assert_eq!(source, BootstrapSource::Cache);
        assert_eq!(tasks[0].title, "Cached");
    }

    #[test]
    fn test_bootstrap_without_remote_reads_cache() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        cache.save(&[task(7, "Cached")]).unwrap();

        let (tasks, source) = bootstrap(None, &cache);

        assert_eq!(source, BootstrapSource::Cache);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_bootstrap_empty_cache_file_yields_seed() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        cache.save(&[]).unwrap();

        let (tasks, source) = bootstrap(None, &cache);

        assert_eq!(source, BootstrapSource::Seed);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_fresh_board_accepts_edits_on_top_of_seed() {
        use crate::store::TaskStore;

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);

        let (tasks, source) = bootstrap(Some(&FailingRemote), &cache);
        assert_eq!(source, BootstrapSource::Seed);

        let mut store = TaskStore::new(tasks);
        let new = store.create("Buy milk", "", Assignee::Scott).unwrap();
        assert_eq!(store.len(), 2);

        store.move_status(new.id, Status::Done).unwrap();
        let done: Vec<i64> = store.column(Status::Done).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![new.id]);
        // The seed stays put in todo.
        assert_eq!(store.column(Status::Todo).len(), 1);
        assert_eq!(store.column(Status::Todo)[0].title, "Welcome to our Kanban! 🎉");
    }
}
