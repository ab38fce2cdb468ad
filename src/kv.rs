// Key-value persistence backends

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// String store keyed by a fixed name, like web local storage
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Check that a key is usable as a filename and a primary key
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(eyre!("Storage key cannot be empty"));
    }
    if key.len() > 64 {
        return Err(eyre!("Storage key too long: {} (max 64 chars)", key));
    }
    if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(eyre!("Invalid storage key: {} (must be alphanumeric with _/-)", key));
    }
    Ok(())
}

// ============================================================================
// In-memory
// ============================================================================

/// Volatile store, nothing survives the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// Files
// ============================================================================

/// One `<key>.json` file per key inside a directory
///
/// Writes go to a temp file that is renamed over the target while an
/// exclusive lock on `<key>.lock` is held, so readers never see a torn file.
#[derive(Debug)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a file store rooted at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn lock_file(&self, key: &str) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.base_path.join(format!("{}.lock", key)))
            .context("Failed to open lock file")
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.value_path(key);

        let lock = self.lock_file(key)?;
        FileExt::lock_shared(&lock).context("Failed to acquire shared file lock")?;

        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        debug!(key, bytes = value.len(), "FileStore::get");
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.value_path(key);
        let tmp_path = self.base_path.join(format!("{}.json.tmp", key));

        // Acquire exclusive lock before writing
        let lock = self.lock_file(key)?;
        lock.lock_exclusive().context("Failed to acquire file lock")?;

        let mut file = File::create(&tmp_path).context("Failed to create temp file")?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path).context("Failed to replace value file")?;

        debug!(key, bytes = value.len(), "FileStore::set");
        // Lock is released when `lock` is dropped
        Ok(())
    }
}

// ============================================================================
// SQLite
// ============================================================================

/// Single `kv` table in a SQLite database
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create store directory")?;
        }

        let db = Connection::open(path).context("Failed to open SQLite database")?;
        let store = Self { db };
        store.create_schema()?;
        Ok(store)
    }

    /// Get a reference to the SQLite database connection
    pub fn db(&self) -> &Connection {
        &self.db
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating kv schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        let value = self
            .db
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .context("Failed to read value from SQLite")?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;

        self.db
            .execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, crate::store::now_ms()],
            )
            .context("Failed to write value to SQLite")?;

        debug!(key, bytes = value.len(), "SqliteStore::set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("todos").is_ok());
        assert!(validate_key("my-todos_2").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("../todos").is_err());
        assert!(validate_key("to dos").is_err());
        assert!(validate_key(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("todos").unwrap(), None);

        store.set("todos", "[]").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[]"));

        store.set("todos", "[1]").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::open(temp.path().join("data")).unwrap();

        assert_eq!(store.get("todos").unwrap(), None);

        store.set("todos", r#"[{"id":1}]"#).unwrap();
        assert!(temp.path().join("data/todos.json").exists());
        assert!(!temp.path().join("data/todos.json.tmp").exists());
        assert_eq!(store.get("todos").unwrap().as_deref(), Some(r#"[{"id":1}]"#));

        // Survives reopening
        let reopened = FileStore::open(temp.path().join("data")).unwrap();
        assert_eq!(reopened.get("todos").unwrap().as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[test]
    fn test_file_store_rejects_bad_key() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("a/b").is_err());
    }

    #[test]
    fn test_sqlite_store_roundtrip() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("todostore.db");
        let mut store = SqliteStore::open(&db_path).unwrap();

        assert_eq!(store.get("todos").unwrap(), None);
        store.set("todos", "[]").unwrap();
        store.set("todos", "[2]").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[2]"));

        let count: i64 = store
            .db()
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        drop(store);
        let reopened = SqliteStore::open(&db_path).unwrap();
        assert_eq!(reopened.get("todos").unwrap().as_deref(), Some("[2]"));
    }
}
