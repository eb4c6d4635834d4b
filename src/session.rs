//! Per-request working directories.
//!
//! Each split runs inside its own `<root>/<uuid>/` directory holding the staged source,
//! the optional cover and every produced track. Isolation is by directory only;
//! old directories are evicted by age before new work starts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, error, info};
use uuid::Uuid;

/// Default age after which a session directory is evicted.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    dir: PathBuf,
}

impl Session {
    /// Create `<root>/<uuid>/` (and `root` itself when missing).
    pub fn create(root: &Path) -> io::Result<Self> {
        let id = Uuid::new_v4();
        let dir = root.join(id.to_string());
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "created session directory");
        Ok(Self { id, dir })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `src` into the session as `name`; returns the staged path.
    pub fn stage(&self, src: &Path, name: &str) -> io::Result<PathBuf> {
        let dest = self.dir.join(name);
        let bytes = fs::copy(src, &dest)?;
        info!(
            from = %src.display(),
            to = %dest.display(),
            kb = bytes / 1024,
            "staged file"
        );
        Ok(dest)
    }
}

/// Remove session directories under `root` last modified more than `max_age` ago.
///
/// Best-effort: failures are logged and skipped. Returns how many were removed.
pub fn evict_stale(root: &Path, max_age: Duration) -> usize {
    let entries = match fs::read_dir(root) {
        Ok(e) => e,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
        Err(e) => {
            error!(root = %root.display(), error = %e, "failed to list session root");
            return 0;
        }
    };

    let cutoff = SystemTime::now()
        .checked_sub(max_age)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let result = entry
            .metadata()
            .and_then(|m| m.modified())
            .and_then(|mtime| {
                if mtime < cutoff {
                    fs::remove_dir_all(&path).map(|()| true)
                } else {
                    Ok(false)
                }
            });

        match result {
            Ok(true) => {
                info!(session = %name, "removed old session directory");
                removed += 1;
            }
            Ok(false) => {}
            Err(e) => error!(session = %name, error = %e, "failed to remove session directory"),
        }
    }
    removed
}
