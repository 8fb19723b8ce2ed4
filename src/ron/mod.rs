//! RON file helpers: directory loading and a change watcher.
//!
//! Settings and maze definitions live as `.ron` files under `data/`. This
//! module reads every `.ron` file in a directory into a typed value and
//! provides a `notify` based watcher that raises a flag when a file in the
//! watched directory is modified.

use bevy::prelude::{warn, Resource};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Directory watcher raising `changed` on modification events.
#[derive(Resource)]
pub struct RonWatcher {
    changed: Arc<AtomicBool>,
    watcher: Option<RecommendedWatcher>, // kept alive for the lifetime of the resource
}

impl RonWatcher {
    /// Watcher without an OS backend. Never reports changes.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher { changed: Arc::new(AtomicBool::new(false)), watcher: None }
    }

    /// Return whether a change was observed since the last call, clearing the flag.
    pub fn take_changed(&self) -> bool {
        self.changed.swap(false, Ordering::AcqRel)
    }

    /// Whether this watcher is backed by an OS watcher.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.watcher.is_some()
    }
}

/// Parse one RON document.
///
/// # Errors
/// Returns the `ron` span error when `content` is not a valid `T`.
pub fn parse_ron<T: DeserializeOwned>(content: &str) -> Result<T, ron::error::SpannedError> {
    ron::from_str::<T>(content)
}

/// Load every `.ron` file in `path` as a `T`, sorted by file name.
///
/// Unreadable or unparsable files are skipped with a warning. A missing
/// directory yields an empty list.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    let mut items = Vec::with_capacity(files.len());
    for file in files {
        let content = match std::fs::read_to_string(&file) {
            Ok(c) => c,
            Err(e) => {
                warn!("failed to read {}: {e}", file.display());
                continue;
            }
        };
        match parse_ron::<T>(&content) {
            Ok(item) => items.push(item),
            Err(e) => warn!("failed to parse {}: {e}", file.display()),
        }
    }
    items
}

/// Watch `path` (non-recursive) for modifications.
///
/// # Errors
/// Returns a `notify::Error` if the OS watcher cannot be created or the
/// directory cannot be registered.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(AtomicBool::new(false));
    let flag = changed.clone();
    let watched: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    std::fs::canonicalize(p).unwrap_or_else(|_| p.clone()).starts_with(&watched)
                });
                if relevant {
                    flag.store(true, Ordering::Release);
                }
            }
            Err(e) => warn!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, watcher: Some(watcher) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn stub_never_reports_change() {
        let w = RonWatcher::stub();
        assert!(!w.is_active());
        assert!(!w.take_changed());
    }

    #[test]
    fn loads_sorted_and_skips_bad_files() {
        let dir = std::env::temp_dir().join(format!("mazewalk_ron_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("b.ron"), "(name: \"second\", count: 2)").unwrap();
        std::fs::write(dir.join("a.ron"), "(name: \"first\")").unwrap();
        std::fs::write(dir.join("broken.ron"), "(name: ").unwrap();
        std::fs::write(dir.join("notes.txt"), "(name: \"ignored\")").unwrap();

        let items: Vec<Sample> = load_ron_files(dir.to_str().unwrap());
        assert_eq!(
            items,
            vec![
                Sample { name: "first".into(), count: 0 },
                Sample { name: "second".into(), count: 2 },
            ]
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_empty() {
        let items: Vec<Sample> = load_ron_files("/definitely/not/here");
        assert!(items.is_empty());
    }
}
