use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::kv::STORE_FILE;

/// Events sent from the watcher thread to the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The store file was written (possibly by another instance)
    Changed,
}

/// Watches the data directory for writes to the key-value store file
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<StoreEvent>,
}

impl StoreWatcher {
    pub fn start(dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                // Temp files and the lock file churn on every save
                if event.paths.iter().any(|p| is_store_file(p)) {
                    let _ = tx.send(StoreEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending events without blocking. Bursts collapse to one.
    pub fn poll(&self) -> Option<StoreEvent> {
        let mut latest = None;
        while let Ok(evt) = self.rx.try_recv() {
            latest = Some(evt);
        }
        latest
    }
}

/// The watch is non-recursive, so the file name alone identifies it
fn is_store_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(STORE_FILE)
}
